//! Integration tests for repository lifecycle, configuration, state files
//! and the foreach bridges.
//!
//! Everything here drives the crate against freshly initialized
//! repositories in temp directories; state files (FETCH_HEAD, MERGE_HEAD,
//! MERGE_MSG) are written directly to exercise the parsers.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use sha1::{Digest, Sha1};
use tempfile::TempDir;

use gitclad::{
    Error, ErrorCode, InitFlags, InitMode, InitOptions, ItemPath, ObjectKind, OpenFlags, Oid,
    RepoState, Repository,
};

/// A fresh non-bare repository in a temp directory.
fn init_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let repo = Repository::init(dir.path(), false).expect("failed to init repo");
    (dir, repo)
}

/// Path of the repository's metadata directory.
fn gitdir(repo: &Repository) -> std::path::PathBuf {
    repo.path().unwrap()
}

// =============================================================================
// Initialization and opening
// =============================================================================

#[test]
fn init_produces_an_empty_unborn_repository() {
    let (_dir, repo) = init_repo();
    assert!(repo.is_empty().unwrap());
    assert!(repo.head_unborn().unwrap());
    assert!(!repo.is_bare().unwrap());
    assert!(!repo.is_worktree().unwrap());
    assert!(!repo.is_shallow().unwrap());
    assert_eq!(repo.state().unwrap(), RepoState::None);
    assert!(repo.workdir().unwrap().is_some());
}

#[test]
fn init_bare_has_no_workdir() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path(), true).unwrap();
    assert!(repo.is_bare().unwrap());
    assert!(repo.workdir().unwrap().is_none());
}

#[test]
fn init_ext_honors_flags_head_and_description() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("nested").join("repo");
    let mut opts = InitOptions::new();
    opts.flags(InitFlags::MKPATH | InitFlags::BARE)
        .mode(InitMode::SharedUmask)
        .initial_head("trunk")
        .description("scratch repository");
    let repo = Repository::init_ext(&target, &opts).unwrap();

    assert!(repo.is_bare().unwrap());
    let head = std::fs::read_to_string(gitdir(&repo).join("HEAD")).unwrap();
    assert_eq!(head.trim(), "ref: refs/heads/trunk");
    let description = std::fs::read_to_string(gitdir(&repo).join("description")).unwrap();
    assert!(description.contains("scratch repository"));
}

#[test]
fn reinit_with_no_reinit_fails() {
    let (dir, _repo) = init_repo();
    let mut opts = InitOptions::new();
    opts.flags(InitFlags::NO_REINIT);
    assert!(Repository::init_ext(dir.path(), &opts).is_err());
}

#[test]
fn open_existing_repository() {
    let (dir, repo) = init_repo();
    drop(repo);
    let reopened = Repository::open(dir.path()).unwrap();
    assert!(reopened.head_unborn().unwrap());
}

#[test]
fn open_non_repository_fails_natively() {
    let dir = TempDir::new().unwrap();
    let err = Repository::open_ext(Some(dir.path()), OpenFlags::NO_SEARCH, None).unwrap_err();
    match err {
        Error::Native { .. } => {}
        other => panic!("expected a native failure, got {other:?}"),
    }
}

#[test]
fn discover_walks_up_from_a_subdirectory() {
    let (dir, _repo) = init_repo();
    let subdir = dir.path().join("a").join("b");
    std::fs::create_dir_all(&subdir).unwrap();

    let found = Repository::discover(&subdir, false, None).unwrap();
    assert!(found.to_string_lossy().contains(".git"));
    assert!(Repository::open(&found).is_ok());
}

#[test]
fn open_bare_on_a_bare_repository() {
    let dir = TempDir::new().unwrap();
    Repository::init(dir.path(), true).unwrap();
    let repo = Repository::open_bare(dir.path()).unwrap();
    assert!(repo.is_bare().unwrap());
}

#[test]
fn engine_version_is_reported() {
    let (major, _, _) = gitclad::version();
    assert!(major >= 1);
}

// =============================================================================
// Paths and layout
// =============================================================================

#[test]
fn paths_point_into_the_repository() {
    let (dir, repo) = init_repo();
    let gitdir = gitdir(&repo);
    assert!(gitdir.to_string_lossy().contains(".git"));
    assert_eq!(repo.commondir().unwrap(), gitdir);

    let workdir = repo.workdir().unwrap().unwrap();
    // Compare canonicalized; the temp dir may be behind a symlink.
    assert_eq!(
        workdir.canonicalize().unwrap(),
        dir.path().canonicalize().unwrap()
    );
}

#[test]
fn item_path_locates_repository_files() {
    let (_dir, repo) = init_repo();
    let config = repo.item_path(ItemPath::Config).unwrap();
    assert!(config.to_string_lossy().ends_with("config"));
    assert!(config.exists());

    let objects = repo.item_path(ItemPath::Objects).unwrap();
    assert!(objects.is_dir());

    // Directory items come back with a trailing separator.
    let commondir = repo.item_path(ItemPath::CommonDir).unwrap();
    assert!(commondir.to_string_lossy().ends_with('/'));
    assert_eq!(commondir, repo.commondir().unwrap());
}

#[test]
fn set_workdir_converts_a_bare_repository() {
    let dir = TempDir::new().unwrap();
    let bare = dir.path().join("store.git");
    let worktree = dir.path().join("work");
    std::fs::create_dir_all(&worktree).unwrap();
    let repo = Repository::init(&bare, true).unwrap();

    repo.set_workdir(&worktree, false).unwrap();
    assert!(!repo.is_bare().unwrap());
    assert!(repo.workdir().unwrap().is_some());
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn config_round_trips_typed_values() {
    let (_dir, repo) = init_repo();
    let config = repo.config().unwrap();

    config.set_string("user.name", "Test User").unwrap();
    assert_eq!(config.get_string("user.name").unwrap(), "Test User");

    config.set_bool("core.ignorecase", true).unwrap();
    assert!(config.get_bool("core.ignorecase").unwrap());

    config.set_i64("pack.packsizelimit", 2_147_483_648).unwrap();
    assert_eq!(
        config.get_i64("pack.packsizelimit").unwrap(),
        2_147_483_648
    );
}

#[test]
fn config_missing_key_is_not_found() {
    let (_dir, repo) = init_repo();
    let config = repo.config().unwrap();
    let err = config.get_string("gitclad.doesnotexist").unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::NotFound));
}

#[test]
fn config_snapshot_is_isolated_from_later_writes() {
    let (_dir, repo) = init_repo();
    let config = repo.config().unwrap();
    config.set_string("test.value", "before").unwrap();

    let snapshot = config.snapshot().unwrap();
    config.set_string("test.value", "after").unwrap();

    assert_eq!(snapshot.get_string("test.value").unwrap(), "before");
    assert_eq!(config.get_string("test.value").unwrap(), "after");
}

#[test]
fn repository_config_snapshot_reads_values() {
    let (_dir, repo) = init_repo();
    repo.config()
        .unwrap()
        .set_string("test.snapshot", "value")
        .unwrap();
    let snapshot = repo.config_snapshot().unwrap();
    assert_eq!(snapshot.get_string("test.snapshot").unwrap(), "value");
}

// =============================================================================
// Identity and namespace
// =============================================================================

#[test]
fn ident_defaults_to_unset() {
    let (_dir, repo) = init_repo();
    let identity = repo.ident().unwrap();
    assert_eq!(identity.name, None);
    assert_eq!(identity.email, None);
}

#[test]
fn ident_round_trips() {
    let (_dir, repo) = init_repo();
    repo.set_ident("Reflog Writer", "reflog@example.invalid")
        .unwrap();
    let identity = repo.ident().unwrap();
    assert_eq!(identity.name.as_deref(), Some("Reflog Writer"));
    assert_eq!(identity.email.as_deref(), Some("reflog@example.invalid"));
}

#[test]
fn namespace_round_trips() {
    let (_dir, repo) = init_repo();
    assert_eq!(repo.namespace().unwrap(), None);
    repo.set_namespace("review").unwrap();
    assert_eq!(repo.namespace().unwrap().as_deref(), Some("review"));
}

// =============================================================================
// State and prepared message
// =============================================================================

#[test]
fn message_absent_is_not_found() {
    let (_dir, repo) = init_repo();
    let err = repo.message().unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::NotFound));
}

#[test]
fn message_reads_and_removes_the_prepared_file() {
    let (_dir, repo) = init_repo();
    std::fs::write(gitdir(&repo).join("MERGE_MSG"), "merged feature\n").unwrap();

    assert_eq!(repo.message().unwrap(), "merged feature\n");
    repo.message_remove().unwrap();
    let err = repo.message().unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::NotFound));
}

#[test]
fn state_cleanup_on_a_quiet_repository_is_a_no_op() {
    let (_dir, repo) = init_repo();
    repo.state_cleanup().unwrap();
    assert_eq!(repo.state().unwrap(), RepoState::None);
    assert!(!repo.state().unwrap().is_in_progress());
}

#[test]
fn head_on_unborn_branch_reports_unborn() {
    let (_dir, repo) = init_repo();
    let err = repo.head().unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::UnbornBranch));
}

// =============================================================================
// Index, object database, reference database
// =============================================================================

#[test]
fn staging_a_file_stores_its_blob() {
    let (dir, repo) = init_repo();
    std::fs::write(dir.path().join("tracked.txt"), "hello world\n").unwrap();

    let index = repo.index().unwrap();
    assert_eq!(index.entry_count().unwrap(), 0);
    index.add_path(Path::new("tracked.txt")).unwrap();
    index.write().unwrap();
    assert_eq!(index.entry_count().unwrap(), 1);
    assert!(!index.has_conflicts().unwrap());
    assert!(index.path().unwrap().is_some());

    // The staged blob is now in the object database.
    let id = repo
        .hashfile(&dir.path().join("tracked.txt"), ObjectKind::Blob, None)
        .unwrap();
    let odb = repo.odb().unwrap();
    assert!(odb.exists(&id).unwrap());
    let (len, kind) = odb.read_header(&id).unwrap();
    assert_eq!(len, "hello world\n".len());
    assert_eq!(kind, ObjectKind::Blob);
}

#[test]
fn index_read_refreshes_from_disk() {
    let (dir, repo) = init_repo();
    std::fs::write(dir.path().join("a.txt"), "a\n").unwrap();
    let index = repo.index().unwrap();
    index.add_path(Path::new("a.txt")).unwrap();
    index.write().unwrap();

    index.read(true).unwrap();
    assert_eq!(index.entry_count().unwrap(), 1);
}

#[test]
fn odb_foreach_visits_stored_objects() {
    let (dir, repo) = init_repo();
    std::fs::write(dir.path().join("a.txt"), "a\n").unwrap();
    std::fs::write(dir.path().join("b.txt"), "b\n").unwrap();
    let index = repo.index().unwrap();
    index.add_path(Path::new("a.txt")).unwrap();
    index.add_path(Path::new("b.txt")).unwrap();

    let odb = repo.odb().unwrap();
    let mut seen = Vec::new();
    odb.oid_foreach(|id| {
        seen.push(id);
        0
    })
    .unwrap();
    assert_eq!(seen.len(), 2);
}

#[test]
fn odb_foreach_stop_surfaces_the_callback_code() {
    let (dir, repo) = init_repo();
    std::fs::write(dir.path().join("a.txt"), "a\n").unwrap();
    std::fs::write(dir.path().join("b.txt"), "b\n").unwrap();
    let index = repo.index().unwrap();
    index.add_path(Path::new("a.txt")).unwrap();
    index.add_path(Path::new("b.txt")).unwrap();

    let mut calls = 0;
    let result = repo.odb().unwrap().oid_foreach(|_| {
        calls += 1;
        4
    });
    assert_eq!(calls, 1);
    match result {
        Err(Error::Stopped(4)) => {}
        other => panic!("expected Stopped(4), got {other:?}"),
    }
}

#[test]
fn odb_missing_object_does_not_exist() {
    let (_dir, repo) = init_repo();
    let absent: Oid = "deadbeefdeadbeefdeadbeefdeadbeefdeadbeef".parse().unwrap();
    assert!(!repo.odb().unwrap().exists(&absent).unwrap());
}

#[test]
fn refdb_compress_succeeds_on_a_fresh_repository() {
    let (_dir, repo) = init_repo();
    repo.refdb().unwrap().compress().unwrap();
}

#[test]
fn hashfile_matches_the_object_hash() {
    let (dir, repo) = init_repo();
    let content = b"hello world\n";
    std::fs::write(dir.path().join("hashme.txt"), content).unwrap();

    // as_path "" disables filtering, so the result is the plain object hash.
    let id = repo
        .hashfile(&dir.path().join("hashme.txt"), ObjectKind::Blob, Some(""))
        .unwrap();

    let mut hasher = Sha1::new();
    hasher.update(format!("blob {}\0", content.len()).as_bytes());
    hasher.update(content);
    let expected = hex::encode(hasher.finalize());
    assert_eq!(id.to_string(), expected);
}

// =============================================================================
// Foreach bridges over state files
// =============================================================================

const OID_A: &str = "476f0c95825ef4479cab580b71f8b85f9dea4ee4";
const OID_B: &str = "0123456789abcdef0123456789abcdef01234567";

#[test]
fn fetchhead_foreach_parses_entries() {
    let (_dir, repo) = init_repo();
    let url = "https://example.invalid/upstream";
    std::fs::write(
        gitdir(&repo).join("FETCH_HEAD"),
        format!(
            "{OID_A}\t\tbranch 'main' of {url}\n{OID_B}\tnot-for-merge\tbranch 'dev' of {url}\n"
        ),
    )
    .unwrap();

    let mut entries = Vec::new();
    repo.fetchhead_foreach(|ref_name, remote_url, id, is_merge| {
        entries.push((ref_name.to_owned(), remote_url.to_owned(), id, is_merge));
        0
    })
    .unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].0, "refs/heads/main");
    assert_eq!(entries[0].1, url);
    assert_eq!(entries[0].2, OID_A.parse().unwrap());
    assert!(entries[0].3);
    assert_eq!(entries[1].0, "refs/heads/dev");
    assert!(!entries[1].3);
}

#[test]
fn fetchhead_foreach_without_file_is_not_found() {
    let (_dir, repo) = init_repo();
    let err = repo.fetchhead_foreach(|_, _, _, _| 0).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::NotFound));
}

#[test]
fn fetchhead_foreach_stops_on_nonzero_return() {
    let (_dir, repo) = init_repo();
    let url = "https://example.invalid/upstream";
    std::fs::write(
        gitdir(&repo).join("FETCH_HEAD"),
        format!("{OID_A}\t\tbranch 'main' of {url}\n{OID_B}\t\tbranch 'dev' of {url}\n"),
    )
    .unwrap();

    let mut calls = 0;
    let result = repo.fetchhead_foreach(|_, _, _, _| {
        calls += 1;
        1
    });
    assert_eq!(calls, 1);
    match result {
        Err(Error::Stopped(1)) => {}
        other => panic!("expected Stopped(1), got {other:?}"),
    }
}

#[test]
fn mergehead_foreach_yields_each_id() {
    let (_dir, repo) = init_repo();
    std::fs::write(gitdir(&repo).join("MERGE_HEAD"), format!("{OID_A}\n{OID_B}\n")).unwrap();

    let mut seen = Vec::new();
    repo.mergehead_foreach(|id| {
        seen.push(id);
        0
    })
    .unwrap();
    assert_eq!(seen, vec![OID_A.parse().unwrap(), OID_B.parse().unwrap()]);
}

#[test]
fn callback_panic_is_contained_and_resumed() {
    let (_dir, repo) = init_repo();
    let url = "https://example.invalid/upstream";
    std::fs::write(
        gitdir(&repo).join("FETCH_HEAD"),
        format!("{OID_A}\t\tbranch 'main' of {url}\n"),
    )
    .unwrap();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        repo.fetchhead_foreach(|_, _, _, _| panic!("callback exploded"))
    }));
    let payload = result.expect_err("the panic should resume after the native call");
    assert_eq!(*payload.downcast_ref::<&str>().unwrap(), "callback exploded");
}

#[test]
fn reference_name_foreach_on_an_empty_repository_sees_nothing() {
    let (_dir, repo) = init_repo();
    let mut names = Vec::new();
    repo.reference_name_foreach(|name| {
        names.push(name.to_owned());
        0
    })
    .unwrap();
    assert!(names.is_empty());
}

// =============================================================================
// Release discipline
// =============================================================================

#[test]
fn use_after_close_fails_locally() {
    let (_dir, repo) = init_repo();
    repo.close();
    repo.close(); // second close is a no-op

    let err = repo.path().unwrap_err();
    match err {
        Error::UseAfterRelease { what } => assert_eq!(what, "repository"),
        other => panic!("expected UseAfterRelease, got {other:?}"),
    }
}

#[test]
fn closing_a_child_does_not_affect_the_parent() {
    let (_dir, repo) = init_repo();
    let config = repo.config().unwrap();
    config.close();
    assert!(config.get_string("user.name").is_err());
    assert!(repo.path().is_ok());
}
