//! repo
//!
//! Context objects over the native repository and its children.
//!
//! # Architecture
//!
//! A [`Repository`] owns exactly one native handle and exposes the domain
//! operations the engine offers for it. Child context objects ([`Config`],
//! [`Odb`], [`Refdb`], [`Index`], [`Reference`], resolved objects) each own
//! their own handle for lifetime-management purposes, but their native
//! validity is contractually bounded by the parent.
//!
//! # Invariants
//!
//! - Every status-returning native call is checked before any output handle
//!   is trusted or wrapped
//! - A child handle must not be used after its parent repository is
//!   released. This is a documented precondition, not a runtime check,
//!   mirroring the native layer's own contract
//! - Release is deterministic: `Drop` and explicit `close()` share one
//!   at-most-once release path

mod config;
mod index;
mod odb;
mod options;
mod refdb;
mod reference;

pub use config::Config;
pub use index::Index;
pub use odb::Odb;
pub use options::{Identity, InitOptions, ItemPath, RepoState};
pub use refdb::Refdb;
pub use reference::{Reference, ReferenceKind};

use std::ffi::CString;
use std::path::{Path, PathBuf};
use std::ptr;

use libc::{c_char, c_int, c_uint, c_void};

use crate::buf::{c_str_to_string, Buf};
use crate::callback::Bridge;
use crate::codec::{NativeEnum, OpenFlags};
use crate::error::{self, Error};
use crate::handle::Handle;
use crate::object::{Object, ObjectKind};
use crate::oid::Oid;
use crate::raw;
use crate::runtime;

/// Convert a path for the boundary. The engine speaks UTF-8 paths.
pub(crate) fn path_to_cstring(path: &Path) -> Result<CString, Error> {
    let utf8 = path.to_str().ok_or_else(|| Error::InvalidState {
        message: format!("path is not valid UTF-8: {}", path.display()),
    })?;
    Ok(CString::new(utf8)?)
}

/// A repository context object.
///
/// The only doorway to a native repository: opening, initialization, HEAD
/// and state queries, and accessors producing child context objects. All
/// operations are synchronous calls into the engine on the caller's thread.
///
/// # Example
///
/// ```ignore
/// use gitclad::Repository;
/// use std::path::Path;
///
/// let repo = Repository::open(Path::new("."))?;
/// if repo.head_unborn()? {
///     println!("no commits yet");
/// }
/// ```
pub struct Repository {
    handle: Handle<raw::git_repository>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("handle", &self.handle)
            .finish()
    }
}

impl Repository {
    // =========================================================================
    // Construction
    // =========================================================================

    pub(crate) fn from_raw(ptr: *mut raw::git_repository) -> Repository {
        Repository {
            handle: Handle::new(ptr, "repository"),
        }
    }

    /// Wrap an address owned by another object (owner lookups). Releasing
    /// the wrapper never frees the repository.
    pub(crate) fn from_borrowed(ptr: *mut raw::git_repository) -> Repository {
        Repository {
            handle: Handle::borrowed(ptr, "repository"),
        }
    }

    /// Open an existing repository at `path`.
    pub fn open(path: &Path) -> Result<Repository, Error> {
        runtime::init();
        let c_path = path_to_cstring(path)?;
        let mut out = ptr::null_mut();
        unsafe {
            error::check(raw::git_repository_open(&mut out, c_path.as_ptr()))?;
        }
        Ok(Repository::from_raw(out))
    }

    /// Open a bare repository by its direct path.
    pub fn open_bare(path: &Path) -> Result<Repository, Error> {
        runtime::init();
        let c_path = path_to_cstring(path)?;
        let mut out = ptr::null_mut();
        unsafe {
            error::check(raw::git_repository_open_bare(&mut out, c_path.as_ptr()))?;
        }
        Ok(Repository::from_raw(out))
    }

    /// Find and open a repository with extended controls.
    ///
    /// `ceiling_dirs` is a separator-delimited list of path prefixes at
    /// which an upward search stops. With [`OpenFlags::FROM_ENV`], `path`
    /// may be `None` to let the engine consult the environment.
    pub fn open_ext(
        path: Option<&Path>,
        flags: OpenFlags,
        ceiling_dirs: Option<&str>,
    ) -> Result<Repository, Error> {
        runtime::init();
        let c_path = path.map(path_to_cstring).transpose()?;
        let c_ceiling = ceiling_dirs.map(CString::new).transpose()?;
        let mut out = ptr::null_mut();
        unsafe {
            error::check(raw::git_repository_open_ext(
                &mut out,
                c_path.as_ref().map_or(ptr::null(), |p| p.as_ptr()),
                flags.bits() as c_uint,
                c_ceiling.as_ref().map_or(ptr::null(), |c| c.as_ptr()),
            ))?;
        }
        Ok(Repository::from_raw(out))
    }

    /// Walk upward from `start` looking for a repository; returns the path
    /// of its metadata directory.
    pub fn discover(
        start: &Path,
        across_fs: bool,
        ceiling_dirs: Option<&str>,
    ) -> Result<PathBuf, Error> {
        runtime::init();
        let c_start = path_to_cstring(start)?;
        let c_ceiling = ceiling_dirs.map(CString::new).transpose()?;
        let mut buf = Buf::new();
        unsafe {
            error::check(raw::git_repository_discover(
                buf.as_raw_mut(),
                c_start.as_ptr(),
                across_fs as c_int,
                c_ceiling.as_ref().map_or(ptr::null(), |c| c.as_ptr()),
            ))?;
        }
        Ok(PathBuf::from(buf.to_string_lossy()))
    }

    /// Create a new repository at `path`. With `bare`, no working
    /// directory is created; otherwise `path` becomes the working
    /// directory and the metadata directory is created inside it.
    pub fn init(path: &Path, bare: bool) -> Result<Repository, Error> {
        runtime::init();
        let c_path = path_to_cstring(path)?;
        let mut out = ptr::null_mut();
        unsafe {
            error::check(raw::git_repository_init(
                &mut out,
                c_path.as_ptr(),
                bare as c_uint,
            ))?;
        }
        Ok(Repository::from_raw(out))
    }

    /// Create or reinitialize a repository with extended controls.
    pub fn init_ext(path: &Path, opts: &InitOptions) -> Result<Repository, Error> {
        runtime::init();
        let c_path = path_to_cstring(path)?;
        let mut out = ptr::null_mut();
        // The owned CStrings in `storage` must outlive the native call.
        let mut storage = options::InitOptionsStorage::default();
        let mut raw_opts = opts.to_raw(&mut storage)?;
        unsafe {
            error::check(raw::git_repository_init_ext(
                &mut out,
                c_path.as_ptr(),
                &mut raw_opts,
            ))?;
        }
        Ok(Repository::from_raw(out))
    }

    // =========================================================================
    // Paths and layout
    // =========================================================================

    /// Path of the repository's metadata directory.
    pub fn path(&self) -> Result<PathBuf, Error> {
        let repo = self.handle.get()?;
        let path = unsafe { c_str_to_string(raw::git_repository_path(repo)) };
        path.map(PathBuf::from).ok_or_else(|| Error::InvalidState {
            message: "repository reports no metadata path".into(),
        })
    }

    /// Path of the working directory, absent for bare repositories.
    pub fn workdir(&self) -> Result<Option<PathBuf>, Error> {
        let repo = self.handle.get()?;
        Ok(unsafe { c_str_to_string(raw::git_repository_workdir(repo)) }.map(PathBuf::from))
    }

    /// Set the working directory. With `update_gitlink`, writes the
    /// gitlink and `core.worktree` when the workdir is not the metadata
    /// directory's parent.
    pub fn set_workdir(&self, path: &Path, update_gitlink: bool) -> Result<(), Error> {
        let repo = self.handle.get()?;
        let c_path = path_to_cstring(path)?;
        unsafe {
            error::check(raw::git_repository_set_workdir(
                repo,
                c_path.as_ptr(),
                update_gitlink as c_int,
            ))
        }
    }

    /// Path of the shared common directory (the metadata directory for a
    /// main repository, the shared directory for a linked worktree).
    pub fn commondir(&self) -> Result<PathBuf, Error> {
        let repo = self.handle.get()?;
        let path = unsafe { c_str_to_string(raw::git_repository_commondir(repo)) };
        path.map(PathBuf::from).ok_or_else(|| Error::InvalidState {
            message: "repository reports no common directory".into(),
        })
    }

    /// Location of a specific repository file or directory.
    pub fn item_path(&self, item: ItemPath) -> Result<PathBuf, Error> {
        let repo = self.handle.get()?;
        let mut buf = Buf::new();
        unsafe {
            error::check(raw::git_repository_item_path(
                buf.as_raw_mut(),
                repo,
                item.native(),
            ))?;
        }
        Ok(PathBuf::from(buf.to_string_lossy()))
    }

    // =========================================================================
    // Predicates
    // =========================================================================

    pub fn is_bare(&self) -> Result<bool, Error> {
        let repo = self.handle.get()?;
        Ok(unsafe { raw::git_repository_is_bare(repo) } == 1)
    }

    pub fn is_worktree(&self) -> Result<bool, Error> {
        let repo = self.handle.get()?;
        Ok(unsafe { raw::git_repository_is_worktree(repo) } == 1)
    }

    /// Whether the repository was a shallow clone.
    pub fn is_shallow(&self) -> Result<bool, Error> {
        let repo = self.handle.get()?;
        Ok(unsafe { raw::git_repository_is_shallow(repo) } == 1)
    }

    /// Whether the repository is empty (an unborn HEAD pointing at the
    /// default branch and nothing else).
    pub fn is_empty(&self) -> Result<bool, Error> {
        let repo = self.handle.get()?;
        let rc = unsafe { raw::git_repository_is_empty(repo) };
        error::check(rc)?;
        Ok(rc == 1)
    }

    /// Whether HEAD points directly at a commit rather than a branch.
    pub fn head_detached(&self) -> Result<bool, Error> {
        let repo = self.handle.get()?;
        let rc = unsafe { raw::git_repository_head_detached(repo) };
        error::check(rc)?;
        Ok(rc == 1)
    }

    /// Whether HEAD refers to a branch with no commits yet.
    pub fn head_unborn(&self) -> Result<bool, Error> {
        let repo = self.handle.get()?;
        let rc = unsafe { raw::git_repository_head_unborn(repo) };
        error::check(rc)?;
        Ok(rc == 1)
    }

    // =========================================================================
    // HEAD
    // =========================================================================

    /// Retrieve and resolve the reference pointed at by HEAD.
    pub fn head(&self) -> Result<Reference, Error> {
        let repo = self.handle.get()?;
        let mut out = ptr::null_mut();
        unsafe {
            error::check(raw::git_repository_head(&mut out, repo))?;
        }
        Ok(Reference::from_raw(out))
    }

    /// Look up a reference by its full name, e.g. `refs/heads/main` or
    /// `HEAD`. Symbolic references are returned unresolved.
    pub fn find_reference(&self, name: &str) -> Result<Reference, Error> {
        let repo = self.handle.get()?;
        let c_name = CString::new(name)?;
        let mut out = ptr::null_mut();
        unsafe {
            error::check(raw::git_reference_lookup(&mut out, repo, c_name.as_ptr()))?;
        }
        Ok(Reference::from_raw(out))
    }

    /// HEAD of the named linked worktree.
    pub fn head_for_worktree(&self, name: &str) -> Result<Reference, Error> {
        let repo = self.handle.get()?;
        let c_name = CString::new(name)?;
        let mut out = ptr::null_mut();
        unsafe {
            error::check(raw::git_repository_head_for_worktree(
                &mut out,
                repo,
                c_name.as_ptr(),
            ))?;
        }
        Ok(Reference::from_raw(out))
    }

    /// Make HEAD point at the named reference.
    pub fn set_head(&self, refname: &str) -> Result<(), Error> {
        let repo = self.handle.get()?;
        let c_refname = CString::new(refname)?;
        unsafe { error::check(raw::git_repository_set_head(repo, c_refname.as_ptr())) }
    }

    /// Make HEAD point directly at a commit.
    pub fn set_head_detached(&self, commitish: &Oid) -> Result<(), Error> {
        let repo = self.handle.get()?;
        unsafe { error::check(raw::git_repository_set_head_detached(repo, commitish.as_raw())) }
    }

    /// Detach HEAD at its current commit.
    pub fn detach_head(&self) -> Result<(), Error> {
        let repo = self.handle.get()?;
        unsafe { error::check(raw::git_repository_detach_head(repo)) }
    }

    // =========================================================================
    // State, message, namespace, identity
    // =========================================================================

    /// Whether an operation (merge, cherry-pick, rebase...) is in progress.
    pub fn state(&self) -> Result<RepoState, Error> {
        let repo = self.handle.get()?;
        RepoState::from_native(unsafe { raw::git_repository_state(repo) })
    }

    /// Remove all metadata associated with an ongoing command.
    pub fn state_cleanup(&self) -> Result<(), Error> {
        let repo = self.handle.get()?;
        unsafe { error::check(raw::git_repository_state_cleanup(repo)) }
    }

    /// Git's prepared commit message. Fails with
    /// [`crate::ErrorCode::NotFound`] when none exists.
    pub fn message(&self) -> Result<String, Error> {
        let repo = self.handle.get()?;
        let mut buf = Buf::new();
        unsafe {
            error::check(raw::git_repository_message(buf.as_raw_mut(), repo))?;
        }
        Ok(buf.to_string_lossy())
    }

    /// Remove the prepared commit message.
    pub fn message_remove(&self) -> Result<(), Error> {
        let repo = self.handle.get()?;
        unsafe { error::check(raw::git_repository_message_remove(repo)) }
    }

    /// The active reference namespace, if one is set.
    pub fn namespace(&self) -> Result<Option<String>, Error> {
        let repo = self.handle.get()?;
        Ok(unsafe { c_str_to_string(raw::git_repository_get_namespace(repo)) })
    }

    /// Set the active reference namespace (without the `refs/namespaces/`
    /// prefix); affects all reference operations on this repository.
    pub fn set_namespace(&self, namespace: &str) -> Result<(), Error> {
        let repo = self.handle.get()?;
        let c_namespace = CString::new(namespace)?;
        unsafe {
            error::check(raw::git_repository_set_namespace(
                repo,
                c_namespace.as_ptr(),
            ))
        }
    }

    /// Identity used for writing reflogs.
    pub fn ident(&self) -> Result<Identity, Error> {
        let repo = self.handle.get()?;
        let mut name: *const c_char = ptr::null();
        let mut email: *const c_char = ptr::null();
        unsafe {
            error::check(raw::git_repository_ident(&mut name, &mut email, repo))?;
            Ok(Identity {
                name: c_str_to_string(name),
                email: c_str_to_string(email),
            })
        }
    }

    /// Set the identity used for writing reflogs.
    pub fn set_ident(&self, name: &str, email: &str) -> Result<(), Error> {
        let repo = self.handle.get()?;
        let c_name = CString::new(name)?;
        let c_email = CString::new(email)?;
        unsafe {
            error::check(raw::git_repository_set_ident(
                repo,
                c_name.as_ptr(),
                c_email.as_ptr(),
            ))
        }
    }

    // =========================================================================
    // Child context objects
    // =========================================================================
    //
    // Each accessor hands out an independently released handle whose native
    // validity ends when this repository is released (documented
    // precondition; see module docs).

    /// The configuration for this repository.
    pub fn config(&self) -> Result<Config, Error> {
        let repo = self.handle.get()?;
        let mut out = ptr::null_mut();
        unsafe {
            error::check(raw::git_repository_config(&mut out, repo))?;
        }
        Ok(Config::from_raw(out))
    }

    /// A read-only, consistent snapshot of the configuration.
    pub fn config_snapshot(&self) -> Result<Config, Error> {
        let repo = self.handle.get()?;
        let mut out = ptr::null_mut();
        unsafe {
            error::check(raw::git_repository_config_snapshot(&mut out, repo))?;
        }
        Ok(Config::from_raw(out))
    }

    /// The object database for this repository.
    pub fn odb(&self) -> Result<Odb, Error> {
        let repo = self.handle.get()?;
        let mut out = ptr::null_mut();
        unsafe {
            error::check(raw::git_repository_odb(&mut out, repo))?;
        }
        Ok(Odb::from_raw(out))
    }

    /// The reference database for this repository.
    pub fn refdb(&self) -> Result<Refdb, Error> {
        let repo = self.handle.get()?;
        let mut out = ptr::null_mut();
        unsafe {
            error::check(raw::git_repository_refdb(&mut out, repo))?;
        }
        Ok(Refdb::from_raw(out))
    }

    /// The index file for this repository.
    pub fn index(&self) -> Result<Index, Error> {
        let repo = self.handle.get()?;
        let mut out = ptr::null_mut();
        unsafe {
            error::check(raw::git_repository_index(&mut out, repo))?;
        }
        Ok(Index::from_raw(out))
    }

    // =========================================================================
    // Objects
    // =========================================================================

    /// Look up an object by id, resolving it into its typed view.
    pub fn lookup_object(&self, id: &Oid, kind: ObjectKind) -> Result<Object, Error> {
        let repo = self.handle.get()?;
        let mut out = ptr::null_mut();
        unsafe {
            error::check(raw::git_object_lookup(
                &mut out,
                repo,
                id.as_raw(),
                kind.encode(),
            ))?;
            Object::from_raw(out)
        }
    }

    /// Look up an object by the first `len` hex digits of its id.
    pub fn lookup_object_prefix(
        &self,
        id: &Oid,
        len: usize,
        kind: ObjectKind,
    ) -> Result<Object, Error> {
        let repo = self.handle.get()?;
        let mut out = ptr::null_mut();
        unsafe {
            error::check(raw::git_object_lookup_prefix(
                &mut out,
                repo,
                id.as_raw(),
                len,
                kind.encode(),
            ))?;
            Object::from_raw(out)
        }
    }

    /// Hash a file as an object of `kind`, applying the repository's
    /// filtering rules.
    ///
    /// `as_path` selects which path's filter rules apply: `None` uses
    /// `path` itself, while `Some("")` disables filtering entirely.
    pub fn hashfile(
        &self,
        path: &Path,
        kind: ObjectKind,
        as_path: Option<&str>,
    ) -> Result<Oid, Error> {
        let repo = self.handle.get()?;
        let c_path = path_to_cstring(path)?;
        let c_as_path = as_path.map(CString::new).transpose()?;
        let mut out = Oid::zero();
        unsafe {
            error::check(raw::git_repository_hashfile(
                out.as_raw_mut(),
                repo,
                c_path.as_ptr(),
                kind.encode(),
                c_as_path.as_ref().map_or(ptr::null(), |c| c.as_ptr()),
            ))?;
        }
        Ok(out)
    }

    // =========================================================================
    // Iteration (callback bridge instances)
    // =========================================================================

    /// Invoke `callback` for each entry of the FETCH_HEAD file as
    /// `(ref_name, remote_url, oid, is_merge)`. Returning non-zero stops
    /// iteration and surfaces as [`Error::Stopped`].
    pub fn fetchhead_foreach<F>(&self, callback: F) -> Result<(), Error>
    where
        F: FnMut(&str, &str, Oid, bool) -> i32,
    {
        let repo = self.handle.get()?;
        let mut bridge = Bridge::new(callback);
        let status = unsafe {
            raw::git_repository_fetchhead_foreach(
                repo,
                Some(fetchhead_trampoline::<F>),
                bridge.payload(),
            )
        };
        bridge.finish(status)
    }

    /// If a merge is in progress, invoke `callback` for each commit id in
    /// the MERGE_HEAD file.
    pub fn mergehead_foreach<F>(&self, callback: F) -> Result<(), Error>
    where
        F: FnMut(Oid) -> i32,
    {
        let repo = self.handle.get()?;
        let mut bridge = Bridge::new(callback);
        let status = unsafe {
            raw::git_repository_mergehead_foreach(
                repo,
                Some(mergehead_trampoline::<F>),
                bridge.payload(),
            )
        };
        bridge.finish(status)
    }

    /// Invoke `callback` with the full name of every reference.
    pub fn reference_name_foreach<F>(&self, callback: F) -> Result<(), Error>
    where
        F: FnMut(&str) -> i32,
    {
        let repo = self.handle.get()?;
        let mut bridge = Bridge::new(callback);
        let status = unsafe {
            raw::git_reference_foreach_name(
                repo,
                Some(reference_name_trampoline::<F>),
                bridge.payload(),
            )
        };
        bridge.finish(status)
    }

    // =========================================================================
    // Release
    // =========================================================================

    /// Release the native handle now; further use fails with
    /// [`Error::UseAfterRelease`]. A second close is a no-op.
    pub fn close(&self) {
        self.handle.release_with(raw::git_repository_free);
    }
}

impl Drop for Repository {
    fn drop(&mut self) {
        self.close();
    }
}

unsafe extern "C" fn fetchhead_trampoline<F>(
    ref_name: *const c_char,
    remote_url: *const c_char,
    oid: *const raw::git_oid,
    is_merge: c_uint,
    payload: *mut c_void,
) -> c_int
where
    F: FnMut(&str, &str, Oid, bool) -> i32,
{
    let bridge = &mut *(payload as *mut Bridge<F>);
    let ref_name = c_str_to_string(ref_name).unwrap_or_default();
    let remote_url = c_str_to_string(remote_url).unwrap_or_default();
    let oid = Oid::from_ptr(oid);
    bridge.invoke(|cb| cb(&ref_name, &remote_url, oid, is_merge == 1))
}

unsafe extern "C" fn mergehead_trampoline<F>(oid: *const raw::git_oid, payload: *mut c_void) -> c_int
where
    F: FnMut(Oid) -> i32,
{
    let bridge = &mut *(payload as *mut Bridge<F>);
    let oid = Oid::from_ptr(oid);
    bridge.invoke(|cb| cb(oid))
}

unsafe extern "C" fn reference_name_trampoline<F>(
    name: *const c_char,
    payload: *mut c_void,
) -> c_int
where
    F: FnMut(&str) -> i32,
{
    let bridge = &mut *(payload as *mut Bridge<F>);
    let name = c_str_to_string(name).unwrap_or_default();
    bridge.invoke(|cb| cb(&name))
}
