//! Option builders and small value types for repository operations.

use std::ffi::CString;
use std::ptr;

use libc::c_int;

use crate::codec::{InitFlags, InitMode};
use crate::error::{Error, ErrorClass, ErrorCode};
use crate::raw;

/// Controls for [`crate::Repository::init_ext`].
///
/// String fields are kept as owned Rust strings and materialized into a
/// native options struct per call.
///
/// # Example
///
/// ```ignore
/// let mut opts = InitOptions::new();
/// opts.flags(InitFlags::MKPATH | InitFlags::NO_REINIT)
///     .initial_head("main")
///     .description("scratch repository");
/// let repo = Repository::init_ext(&path, &opts)?;
/// ```
#[derive(Debug, Clone)]
pub struct InitOptions {
    flags: InitFlags,
    mode: InitMode,
    workdir_path: Option<String>,
    description: Option<String>,
    template_path: Option<String>,
    initial_head: Option<String>,
    origin_url: Option<String>,
}

impl Default for InitOptions {
    fn default() -> InitOptions {
        InitOptions::new()
    }
}

impl InitOptions {
    pub fn new() -> InitOptions {
        InitOptions {
            flags: InitFlags::empty(),
            mode: InitMode::SharedUmask,
            workdir_path: None,
            description: None,
            template_path: None,
            initial_head: None,
            origin_url: None,
        }
    }

    pub fn flags(&mut self, flags: InitFlags) -> &mut InitOptions {
        self.flags = flags;
        self
    }

    pub fn mode(&mut self, mode: InitMode) -> &mut InitOptions {
        self.mode = mode;
        self
    }

    /// Working directory path when it is not the repository path's parent.
    pub fn workdir_path(&mut self, path: &str) -> &mut InitOptions {
        self.workdir_path = Some(path.to_owned());
        self
    }

    /// Contents for the `description` file.
    pub fn description(&mut self, description: &str) -> &mut InitOptions {
        self.description = Some(description.to_owned());
        self
    }

    /// Template directory, used with [`InitFlags::EXTERNAL_TEMPLATE`].
    pub fn template_path(&mut self, path: &str) -> &mut InitOptions {
        self.template_path = Some(path.to_owned());
        self
    }

    /// Branch name HEAD points at initially, without the `refs/heads/`
    /// prefix.
    pub fn initial_head(&mut self, refname: &str) -> &mut InitOptions {
        self.initial_head = Some(refname.to_owned());
        self
    }

    /// If set, an `origin` remote is created pointing at this URL.
    pub fn origin_url(&mut self, url: &str) -> &mut InitOptions {
        self.origin_url = Some(url.to_owned());
        self
    }

    /// Materialize the native options struct. The CStrings placed in
    /// `storage` back the raw pointers and must outlive the native call.
    pub(crate) fn to_raw(
        &self,
        storage: &mut InitOptionsStorage,
    ) -> Result<raw::git_repository_init_options, Error> {
        storage.workdir_path = self.workdir_path.as_deref().map(CString::new).transpose()?;
        storage.description = self.description.as_deref().map(CString::new).transpose()?;
        storage.template_path = self.template_path.as_deref().map(CString::new).transpose()?;
        storage.initial_head = self.initial_head.as_deref().map(CString::new).transpose()?;
        storage.origin_url = self.origin_url.as_deref().map(CString::new).transpose()?;

        fn ptr_of(s: &Option<CString>) -> *const libc::c_char {
            s.as_ref().map_or(ptr::null(), |c| c.as_ptr())
        }

        Ok(raw::git_repository_init_options {
            version: raw::GIT_REPOSITORY_INIT_OPTIONS_VERSION,
            flags: self.flags.bits(),
            mode: self.mode.bits(),
            workdir_path: ptr_of(&storage.workdir_path),
            description: ptr_of(&storage.description),
            template_path: ptr_of(&storage.template_path),
            initial_head: ptr_of(&storage.initial_head),
            origin_url: ptr_of(&storage.origin_url),
        })
    }
}

/// Owned backing for the raw pointers in a materialized options struct.
#[derive(Default)]
pub(crate) struct InitOptionsStorage {
    workdir_path: Option<CString>,
    description: Option<CString>,
    template_path: Option<CString>,
    initial_head: Option<CString>,
    origin_url: Option<CString>,
}

/// Selector for [`crate::Repository::item_path`].
///
/// Encode-only: the selector travels into the engine and never comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPath {
    GitDir,
    WorkDir,
    CommonDir,
    Index,
    Objects,
    Refs,
    PackedRefs,
    Remotes,
    Config,
    Info,
    Hooks,
    Logs,
    Modules,
    Worktrees,
}

impl ItemPath {
    pub(crate) fn native(self) -> c_int {
        match self {
            ItemPath::GitDir => raw::GIT_REPOSITORY_ITEM_GITDIR,
            ItemPath::WorkDir => raw::GIT_REPOSITORY_ITEM_WORKDIR,
            ItemPath::CommonDir => raw::GIT_REPOSITORY_ITEM_COMMONDIR,
            ItemPath::Index => raw::GIT_REPOSITORY_ITEM_INDEX,
            ItemPath::Objects => raw::GIT_REPOSITORY_ITEM_OBJECTS,
            ItemPath::Refs => raw::GIT_REPOSITORY_ITEM_REFS,
            ItemPath::PackedRefs => raw::GIT_REPOSITORY_ITEM_PACKED_REFS,
            ItemPath::Remotes => raw::GIT_REPOSITORY_ITEM_REMOTES,
            ItemPath::Config => raw::GIT_REPOSITORY_ITEM_CONFIG,
            ItemPath::Info => raw::GIT_REPOSITORY_ITEM_INFO,
            ItemPath::Hooks => raw::GIT_REPOSITORY_ITEM_HOOKS,
            ItemPath::Logs => raw::GIT_REPOSITORY_ITEM_LOGS,
            ItemPath::Modules => raw::GIT_REPOSITORY_ITEM_MODULES,
            ItemPath::Worktrees => raw::GIT_REPOSITORY_ITEM_WORKTREES,
        }
    }
}

/// In-progress operation reported by [`crate::Repository::state`].
///
/// Unlike the tolerant codecs, an out-of-range state value is a hard
/// failure: the state table is small and closed, and an unknown value means
/// the engine and this crate disagree about the repository's condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoState {
    None,
    Merge,
    Revert,
    RevertSequence,
    CherryPick,
    CherryPickSequence,
    Bisect,
    Rebase,
    RebaseInteractive,
    RebaseMerge,
    ApplyMailbox,
    ApplyMailboxOrRebase,
}

impl RepoState {
    pub(crate) fn from_native(state: c_int) -> Result<RepoState, Error> {
        match state {
            raw::GIT_REPOSITORY_STATE_NONE => Ok(RepoState::None),
            raw::GIT_REPOSITORY_STATE_MERGE => Ok(RepoState::Merge),
            raw::GIT_REPOSITORY_STATE_REVERT => Ok(RepoState::Revert),
            raw::GIT_REPOSITORY_STATE_REVERT_SEQUENCE => Ok(RepoState::RevertSequence),
            raw::GIT_REPOSITORY_STATE_CHERRYPICK => Ok(RepoState::CherryPick),
            raw::GIT_REPOSITORY_STATE_CHERRYPICK_SEQUENCE => Ok(RepoState::CherryPickSequence),
            raw::GIT_REPOSITORY_STATE_BISECT => Ok(RepoState::Bisect),
            raw::GIT_REPOSITORY_STATE_REBASE => Ok(RepoState::Rebase),
            raw::GIT_REPOSITORY_STATE_REBASE_INTERACTIVE => Ok(RepoState::RebaseInteractive),
            raw::GIT_REPOSITORY_STATE_REBASE_MERGE => Ok(RepoState::RebaseMerge),
            raw::GIT_REPOSITORY_STATE_APPLY_MAILBOX => Ok(RepoState::ApplyMailbox),
            raw::GIT_REPOSITORY_STATE_APPLY_MAILBOX_OR_REBASE => {
                Ok(RepoState::ApplyMailboxOrRebase)
            }
            other => Err(Error::Native {
                class: ErrorClass::Repository,
                code: ErrorCode::Invalid,
                message: format!("unknown repository state code: {other}"),
            }),
        }
    }

    /// Whether an operation is mid-flight and would block others.
    pub fn is_in_progress(self) -> bool {
        self != RepoState::None
    }
}

/// Name and email pair used for reflog entries.
///
/// Either field may be unset, in which case the engine falls back to the
/// configured user identity when writing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Identity {
    pub name: Option<String>,
    pub email: Option<String>,
}
