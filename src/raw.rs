//! raw
//!
//! The extern surface consumed from the native engine.
//!
//! This module declares exactly the libgit2 entry points the crate calls:
//! opaque handle types, the integer constant tables (error codes, error
//! classes, object kinds, repository states, item selectors, flag bits),
//! the handful of by-value structs, and the function signatures. The native
//! library itself is compiled and linked by `libgit2-sys` (vendored).
//!
//! Nothing in here is safe to call directly; every use goes through the
//! typed wrappers in the rest of the crate.

#![allow(non_camel_case_types)]

// Forces the vendored native engine to be linked; nothing else is taken
// from the crate.
use libgit2_sys as _;

use libc::{c_char, c_int, c_uint, c_void, size_t};

// Opaque native handle types. Only ever used behind raw pointers.
pub enum git_repository {}
pub enum git_config {}
pub enum git_odb {}
pub enum git_refdb {}
pub enum git_index {}
pub enum git_reference {}
pub enum git_object {}
pub enum git_commit {}
pub enum git_tree {}
pub enum git_blob {}
pub enum git_tag {}

pub type git_object_t = c_int;
pub type git_object_size_t = u64;

pub const GIT_OID_RAWSZ: usize = 20;
pub const GIT_OID_HEXSZ: usize = GIT_OID_RAWSZ * 2;

/// A 20-byte object id, by value.
#[repr(C)]
#[derive(Copy, Clone)]
pub struct git_oid {
    pub id: [u8; GIT_OID_RAWSZ],
}

/// Native-owned growable byte region written by value-producing calls.
#[repr(C)]
pub struct git_buf {
    pub ptr: *mut c_char,
    pub reserved: size_t,
    pub size: size_t,
}

/// The process-wide "last error" record.
#[repr(C)]
pub struct git_error {
    pub message: *mut c_char,
    pub klass: c_int,
}

// git_error_code
pub const GIT_OK: c_int = 0;
pub const GIT_ERROR: c_int = -1;
pub const GIT_ENOTFOUND: c_int = -3;
pub const GIT_EEXISTS: c_int = -4;
pub const GIT_EAMBIGUOUS: c_int = -5;
pub const GIT_EBUFS: c_int = -6;
pub const GIT_EUSER: c_int = -7;
pub const GIT_EBAREREPO: c_int = -8;
pub const GIT_EUNBORNBRANCH: c_int = -9;
pub const GIT_EUNMERGED: c_int = -10;
pub const GIT_ENONFASTFORWARD: c_int = -11;
pub const GIT_EINVALIDSPEC: c_int = -12;
pub const GIT_ECONFLICT: c_int = -13;
pub const GIT_ELOCKED: c_int = -14;
pub const GIT_EMODIFIED: c_int = -15;
pub const GIT_EAUTH: c_int = -16;
pub const GIT_ECERTIFICATE: c_int = -17;
pub const GIT_EAPPLIED: c_int = -18;
pub const GIT_EPEEL: c_int = -19;
pub const GIT_EEOF: c_int = -20;
pub const GIT_EINVALID: c_int = -21;
pub const GIT_EUNCOMMITTED: c_int = -22;
pub const GIT_EDIRECTORY: c_int = -23;
pub const GIT_EMERGECONFLICT: c_int = -24;
pub const GIT_PASSTHROUGH: c_int = -30;
pub const GIT_ITEROVER: c_int = -31;
pub const GIT_RETRY: c_int = -32;
pub const GIT_EMISMATCH: c_int = -33;
pub const GIT_EINDEXDIRTY: c_int = -34;
pub const GIT_EAPPLYFAIL: c_int = -35;

// git_object_t
pub const GIT_OBJECT_ANY: git_object_t = -2;
pub const GIT_OBJECT_INVALID: git_object_t = -1;
pub const GIT_OBJECT_COMMIT: git_object_t = 1;
pub const GIT_OBJECT_TREE: git_object_t = 2;
pub const GIT_OBJECT_BLOB: git_object_t = 3;
pub const GIT_OBJECT_TAG: git_object_t = 4;
pub const GIT_OBJECT_OFS_DELTA: git_object_t = 6;
pub const GIT_OBJECT_REF_DELTA: git_object_t = 7;

// git_reference_t
pub const GIT_REFERENCE_INVALID: c_int = 0;
pub const GIT_REFERENCE_DIRECT: c_int = 1;
pub const GIT_REFERENCE_SYMBOLIC: c_int = 2;

// git_repository_open_flag_t
pub const GIT_REPOSITORY_OPEN_NO_SEARCH: c_uint = 1 << 0;
pub const GIT_REPOSITORY_OPEN_CROSS_FS: c_uint = 1 << 1;
pub const GIT_REPOSITORY_OPEN_BARE: c_uint = 1 << 2;
pub const GIT_REPOSITORY_OPEN_NO_DOTGIT: c_uint = 1 << 3;
pub const GIT_REPOSITORY_OPEN_FROM_ENV: c_uint = 1 << 4;

// git_repository_init_flag_t
pub const GIT_REPOSITORY_INIT_BARE: u32 = 1 << 0;
pub const GIT_REPOSITORY_INIT_NO_REINIT: u32 = 1 << 1;
pub const GIT_REPOSITORY_INIT_NO_DOTGIT_DIR: u32 = 1 << 2;
pub const GIT_REPOSITORY_INIT_MKDIR: u32 = 1 << 3;
pub const GIT_REPOSITORY_INIT_MKPATH: u32 = 1 << 4;
pub const GIT_REPOSITORY_INIT_EXTERNAL_TEMPLATE: u32 = 1 << 5;
pub const GIT_REPOSITORY_INIT_RELATIVE_GITLINK: u32 = 1 << 6;

// git_repository_init_mode_t
pub const GIT_REPOSITORY_INIT_SHARED_UMASK: u32 = 0;
pub const GIT_REPOSITORY_INIT_SHARED_GROUP: u32 = 0o2775;
pub const GIT_REPOSITORY_INIT_SHARED_ALL: u32 = 0o2777;

// git_repository_item_t
pub const GIT_REPOSITORY_ITEM_GITDIR: c_int = 0;
pub const GIT_REPOSITORY_ITEM_WORKDIR: c_int = 1;
pub const GIT_REPOSITORY_ITEM_COMMONDIR: c_int = 2;
pub const GIT_REPOSITORY_ITEM_INDEX: c_int = 3;
pub const GIT_REPOSITORY_ITEM_OBJECTS: c_int = 4;
pub const GIT_REPOSITORY_ITEM_REFS: c_int = 5;
pub const GIT_REPOSITORY_ITEM_PACKED_REFS: c_int = 6;
pub const GIT_REPOSITORY_ITEM_REMOTES: c_int = 7;
pub const GIT_REPOSITORY_ITEM_CONFIG: c_int = 8;
pub const GIT_REPOSITORY_ITEM_INFO: c_int = 9;
pub const GIT_REPOSITORY_ITEM_HOOKS: c_int = 10;
pub const GIT_REPOSITORY_ITEM_LOGS: c_int = 11;
pub const GIT_REPOSITORY_ITEM_MODULES: c_int = 12;
pub const GIT_REPOSITORY_ITEM_WORKTREES: c_int = 13;

// git_repository_state_t
pub const GIT_REPOSITORY_STATE_NONE: c_int = 0;
pub const GIT_REPOSITORY_STATE_MERGE: c_int = 1;
pub const GIT_REPOSITORY_STATE_REVERT: c_int = 2;
pub const GIT_REPOSITORY_STATE_REVERT_SEQUENCE: c_int = 3;
pub const GIT_REPOSITORY_STATE_CHERRYPICK: c_int = 4;
pub const GIT_REPOSITORY_STATE_CHERRYPICK_SEQUENCE: c_int = 5;
pub const GIT_REPOSITORY_STATE_BISECT: c_int = 6;
pub const GIT_REPOSITORY_STATE_REBASE: c_int = 7;
pub const GIT_REPOSITORY_STATE_REBASE_INTERACTIVE: c_int = 8;
pub const GIT_REPOSITORY_STATE_REBASE_MERGE: c_int = 9;
pub const GIT_REPOSITORY_STATE_APPLY_MAILBOX: c_int = 10;
pub const GIT_REPOSITORY_STATE_APPLY_MAILBOX_OR_REBASE: c_int = 11;

// git_feature_t
pub const GIT_FEATURE_THREADS: u32 = 1 << 0;
pub const GIT_FEATURE_HTTPS: u32 = 1 << 1;
pub const GIT_FEATURE_SSH: u32 = 1 << 2;
pub const GIT_FEATURE_NSEC: u32 = 1 << 3;

pub const GIT_REPOSITORY_INIT_OPTIONS_VERSION: c_uint = 1;

#[repr(C)]
pub struct git_repository_init_options {
    pub version: c_uint,
    pub flags: u32,
    pub mode: u32,
    pub workdir_path: *const c_char,
    pub description: *const c_char,
    pub template_path: *const c_char,
    pub initial_head: *const c_char,
    pub origin_url: *const c_char,
}

pub type git_repository_fetchhead_foreach_cb = Option<
    unsafe extern "C" fn(
        ref_name: *const c_char,
        remote_url: *const c_char,
        oid: *const git_oid,
        is_merge: c_uint,
        payload: *mut c_void,
    ) -> c_int,
>;

pub type git_repository_mergehead_foreach_cb =
    Option<unsafe extern "C" fn(oid: *const git_oid, payload: *mut c_void) -> c_int>;

pub type git_reference_foreach_name_cb =
    Option<unsafe extern "C" fn(name: *const c_char, payload: *mut c_void) -> c_int>;

pub type git_odb_foreach_cb =
    Option<unsafe extern "C" fn(id: *const git_oid, payload: *mut c_void) -> c_int>;

extern "C" {
    // global
    pub fn git_libgit2_init() -> c_int;
    pub fn git_libgit2_version(major: *mut c_int, minor: *mut c_int, rev: *mut c_int) -> c_int;
    pub fn git_libgit2_features() -> c_int;

    // error side-channel
    pub fn git_error_last() -> *const git_error;

    // buf
    pub fn git_buf_dispose(buffer: *mut git_buf);

    // repository
    pub fn git_repository_open(out: *mut *mut git_repository, path: *const c_char) -> c_int;
    pub fn git_repository_open_bare(out: *mut *mut git_repository, path: *const c_char) -> c_int;
    pub fn git_repository_open_ext(
        out: *mut *mut git_repository,
        path: *const c_char,
        flags: c_uint,
        ceiling_dirs: *const c_char,
    ) -> c_int;
    pub fn git_repository_discover(
        out: *mut git_buf,
        start_path: *const c_char,
        across_fs: c_int,
        ceiling_dirs: *const c_char,
    ) -> c_int;
    pub fn git_repository_init(
        out: *mut *mut git_repository,
        path: *const c_char,
        is_bare: c_uint,
    ) -> c_int;
    pub fn git_repository_init_ext(
        out: *mut *mut git_repository,
        repo_path: *const c_char,
        opts: *mut git_repository_init_options,
    ) -> c_int;
    pub fn git_repository_free(repo: *mut git_repository);

    pub fn git_repository_path(repo: *const git_repository) -> *const c_char;
    pub fn git_repository_workdir(repo: *const git_repository) -> *const c_char;
    pub fn git_repository_commondir(repo: *const git_repository) -> *const c_char;
    pub fn git_repository_set_workdir(
        repo: *mut git_repository,
        workdir: *const c_char,
        update_gitlink: c_int,
    ) -> c_int;
    pub fn git_repository_item_path(
        out: *mut git_buf,
        repo: *const git_repository,
        item: c_int,
    ) -> c_int;

    pub fn git_repository_is_bare(repo: *const git_repository) -> c_int;
    pub fn git_repository_is_worktree(repo: *const git_repository) -> c_int;
    pub fn git_repository_is_shallow(repo: *mut git_repository) -> c_int;
    pub fn git_repository_is_empty(repo: *mut git_repository) -> c_int;
    pub fn git_repository_head_detached(repo: *mut git_repository) -> c_int;
    pub fn git_repository_head_unborn(repo: *mut git_repository) -> c_int;

    pub fn git_repository_head(out: *mut *mut git_reference, repo: *mut git_repository) -> c_int;
    pub fn git_repository_head_for_worktree(
        out: *mut *mut git_reference,
        repo: *mut git_repository,
        name: *const c_char,
    ) -> c_int;
    pub fn git_repository_set_head(repo: *mut git_repository, refname: *const c_char) -> c_int;
    pub fn git_repository_set_head_detached(
        repo: *mut git_repository,
        commitish: *const git_oid,
    ) -> c_int;
    pub fn git_repository_detach_head(repo: *mut git_repository) -> c_int;

    pub fn git_repository_state(repo: *mut git_repository) -> c_int;
    pub fn git_repository_state_cleanup(repo: *mut git_repository) -> c_int;
    pub fn git_repository_message(out: *mut git_buf, repo: *mut git_repository) -> c_int;
    pub fn git_repository_message_remove(repo: *mut git_repository) -> c_int;

    pub fn git_repository_get_namespace(repo: *mut git_repository) -> *const c_char;
    pub fn git_repository_set_namespace(
        repo: *mut git_repository,
        nmspace: *const c_char,
    ) -> c_int;

    pub fn git_repository_ident(
        name: *mut *const c_char,
        email: *mut *const c_char,
        repo: *const git_repository,
    ) -> c_int;
    pub fn git_repository_set_ident(
        repo: *mut git_repository,
        name: *const c_char,
        email: *const c_char,
    ) -> c_int;

    pub fn git_repository_hashfile(
        out: *mut git_oid,
        repo: *mut git_repository,
        path: *const c_char,
        kind: git_object_t,
        as_path: *const c_char,
    ) -> c_int;

    pub fn git_repository_config(out: *mut *mut git_config, repo: *mut git_repository) -> c_int;
    pub fn git_repository_config_snapshot(
        out: *mut *mut git_config,
        repo: *mut git_repository,
    ) -> c_int;
    pub fn git_repository_odb(out: *mut *mut git_odb, repo: *mut git_repository) -> c_int;
    pub fn git_repository_refdb(out: *mut *mut git_refdb, repo: *mut git_repository) -> c_int;
    pub fn git_repository_index(out: *mut *mut git_index, repo: *mut git_repository) -> c_int;

    pub fn git_repository_fetchhead_foreach(
        repo: *mut git_repository,
        callback: git_repository_fetchhead_foreach_cb,
        payload: *mut c_void,
    ) -> c_int;
    pub fn git_repository_mergehead_foreach(
        repo: *mut git_repository,
        callback: git_repository_mergehead_foreach_cb,
        payload: *mut c_void,
    ) -> c_int;
    pub fn git_reference_foreach_name(
        repo: *mut git_repository,
        callback: git_reference_foreach_name_cb,
        payload: *mut c_void,
    ) -> c_int;

    // config
    pub fn git_config_free(cfg: *mut git_config);
    pub fn git_config_get_string_buf(
        out: *mut git_buf,
        cfg: *const git_config,
        name: *const c_char,
    ) -> c_int;
    pub fn git_config_set_string(
        cfg: *mut git_config,
        name: *const c_char,
        value: *const c_char,
    ) -> c_int;
    pub fn git_config_get_bool(out: *mut c_int, cfg: *const git_config, name: *const c_char)
        -> c_int;
    pub fn git_config_set_bool(cfg: *mut git_config, name: *const c_char, value: c_int) -> c_int;
    pub fn git_config_get_int64(out: *mut i64, cfg: *const git_config, name: *const c_char)
        -> c_int;
    pub fn git_config_set_int64(cfg: *mut git_config, name: *const c_char, value: i64) -> c_int;
    pub fn git_config_snapshot(out: *mut *mut git_config, config: *mut git_config) -> c_int;

    // odb
    pub fn git_odb_free(db: *mut git_odb);
    pub fn git_odb_exists(db: *mut git_odb, id: *const git_oid) -> c_int;
    pub fn git_odb_read_header(
        len_out: *mut size_t,
        type_out: *mut git_object_t,
        db: *mut git_odb,
        id: *const git_oid,
    ) -> c_int;
    pub fn git_odb_foreach(db: *mut git_odb, cb: git_odb_foreach_cb, payload: *mut c_void)
        -> c_int;

    // refdb
    pub fn git_refdb_free(refdb: *mut git_refdb);
    pub fn git_refdb_compress(refdb: *mut git_refdb) -> c_int;

    // index
    pub fn git_index_free(index: *mut git_index);
    pub fn git_index_entrycount(index: *const git_index) -> size_t;
    pub fn git_index_add_bypath(index: *mut git_index, path: *const c_char) -> c_int;
    pub fn git_index_write(index: *mut git_index) -> c_int;
    pub fn git_index_read(index: *mut git_index, force: c_int) -> c_int;
    pub fn git_index_has_conflicts(index: *const git_index) -> c_int;
    pub fn git_index_path(index: *const git_index) -> *const c_char;

    // reference
    pub fn git_reference_lookup(
        out: *mut *mut git_reference,
        repo: *mut git_repository,
        name: *const c_char,
    ) -> c_int;
    pub fn git_reference_free(reference: *mut git_reference);
    pub fn git_reference_name(reference: *const git_reference) -> *const c_char;
    pub fn git_reference_shorthand(reference: *const git_reference) -> *const c_char;
    pub fn git_reference_type(reference: *const git_reference) -> c_int;
    pub fn git_reference_target(reference: *const git_reference) -> *const git_oid;
    pub fn git_reference_symbolic_target(reference: *const git_reference) -> *const c_char;
    pub fn git_reference_resolve(
        out: *mut *mut git_reference,
        reference: *const git_reference,
    ) -> c_int;
    pub fn git_reference_peel(
        out: *mut *mut git_object,
        reference: *const git_reference,
        kind: git_object_t,
    ) -> c_int;
    pub fn git_reference_is_branch(reference: *const git_reference) -> c_int;
    pub fn git_reference_is_remote(reference: *const git_reference) -> c_int;
    pub fn git_reference_is_tag(reference: *const git_reference) -> c_int;

    // object
    pub fn git_object_free(object: *mut git_object);
    pub fn git_object_type(obj: *const git_object) -> git_object_t;
    pub fn git_object_id(obj: *const git_object) -> *const git_oid;
    pub fn git_object_short_id(out: *mut git_buf, obj: *const git_object) -> c_int;
    pub fn git_object_lookup(
        out: *mut *mut git_object,
        repo: *mut git_repository,
        id: *const git_oid,
        kind: git_object_t,
    ) -> c_int;
    pub fn git_object_lookup_prefix(
        out: *mut *mut git_object,
        repo: *mut git_repository,
        id: *const git_oid,
        len: size_t,
        kind: git_object_t,
    ) -> c_int;
    pub fn git_object_peel(
        peeled: *mut *mut git_object,
        object: *const git_object,
        target_type: git_object_t,
    ) -> c_int;
    pub fn git_object_dup(dest: *mut *mut git_object, source: *mut git_object) -> c_int;
    pub fn git_object_owner(obj: *const git_object) -> *mut git_repository;

    // commit
    pub fn git_commit_message(commit: *const git_commit) -> *const c_char;
    pub fn git_commit_summary(commit: *mut git_commit) -> *const c_char;
    pub fn git_commit_time(commit: *const git_commit) -> i64;
    pub fn git_commit_parentcount(commit: *const git_commit) -> c_uint;
    pub fn git_commit_parent_id(commit: *const git_commit, n: c_uint) -> *const git_oid;
    pub fn git_commit_tree_id(commit: *const git_commit) -> *const git_oid;

    // tree
    pub fn git_tree_entrycount(tree: *const git_tree) -> size_t;

    // blob
    pub fn git_blob_rawsize(blob: *const git_blob) -> git_object_size_t;
    pub fn git_blob_rawcontent(blob: *const git_blob) -> *const c_void;
    pub fn git_blob_is_binary(blob: *const git_blob) -> c_int;

    // tag
    pub fn git_tag_name(tag: *const git_tag) -> *const c_char;
    pub fn git_tag_message(tag: *const git_tag) -> *const c_char;
    pub fn git_tag_target_id(tag: *const git_tag) -> *const git_oid;
    pub fn git_tag_target_type(tag: *const git_tag) -> git_object_t;
}
