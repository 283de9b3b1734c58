//! error
//!
//! Translation of native integer statuses into a structured taxonomy.
//!
//! The native engine reports failures through two independent channels: a
//! per-call integer status (negative means failure) and a process-wide
//! "last error" record carrying a class ordinal and a human message. This
//! module is the only place that reads the side-channel: it is consulted
//! once, immediately after a failing call, and never cached or assumed to
//! be populated.
//!
//! Three kinds of failure are kept distinct and never conflated:
//!
//! - [`Error::Native`] - a negative status from a native call, decoded into
//!   `{class, code, message}` for programmatic matching
//! - local programming errors ([`Error::UseAfterRelease`],
//!   [`Error::UnsupportedType`], [`Error::InvalidState`]) - preconditions of
//!   this layer, never surfaced as native failures
//! - [`Error::Stopped`] - a callback asked iteration to stop; a signal, not
//!   an error

use std::ffi::CStr;

use libc::c_int;
use thiserror::Error;

use crate::codec::NativeEnum;
use crate::raw;

/// Coarse origin category of a native failure.
///
/// Decoded from the side-channel's small non-negative class ordinal.
/// Out-of-range ordinals map to [`ErrorClass::Unknown`] rather than failing;
/// the native engine may grow classes this crate does not know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    None,
    NoMemory,
    Os,
    Invalid,
    Reference,
    Zlib,
    Repository,
    Config,
    Regex,
    Odb,
    Index,
    Object,
    Net,
    Tag,
    Tree,
    Indexer,
    Ssl,
    Submodule,
    Thread,
    Stash,
    Checkout,
    FetchHead,
    Merge,
    Ssh,
    Filter,
    Revert,
    Callback,
    CherryPick,
    Describe,
    Rebase,
    Filesystem,
    Patch,
    Worktree,
    Sha1,
    /// Class ordinal not recognized by this crate.
    Unknown,
}

impl NativeEnum for ErrorClass {
    fn decode(raw: c_int) -> ErrorClass {
        match raw {
            0 => ErrorClass::None,
            1 => ErrorClass::NoMemory,
            2 => ErrorClass::Os,
            3 => ErrorClass::Invalid,
            4 => ErrorClass::Reference,
            5 => ErrorClass::Zlib,
            6 => ErrorClass::Repository,
            7 => ErrorClass::Config,
            8 => ErrorClass::Regex,
            9 => ErrorClass::Odb,
            10 => ErrorClass::Index,
            11 => ErrorClass::Object,
            12 => ErrorClass::Net,
            13 => ErrorClass::Tag,
            14 => ErrorClass::Tree,
            15 => ErrorClass::Indexer,
            16 => ErrorClass::Ssl,
            17 => ErrorClass::Submodule,
            18 => ErrorClass::Thread,
            19 => ErrorClass::Stash,
            20 => ErrorClass::Checkout,
            21 => ErrorClass::FetchHead,
            22 => ErrorClass::Merge,
            23 => ErrorClass::Ssh,
            24 => ErrorClass::Filter,
            25 => ErrorClass::Revert,
            26 => ErrorClass::Callback,
            27 => ErrorClass::CherryPick,
            28 => ErrorClass::Describe,
            29 => ErrorClass::Rebase,
            30 => ErrorClass::Filesystem,
            31 => ErrorClass::Patch,
            32 => ErrorClass::Worktree,
            33 => ErrorClass::Sha1,
            _ => ErrorClass::Unknown,
        }
    }

    fn encode(self) -> c_int {
        match self {
            ErrorClass::None => 0,
            ErrorClass::NoMemory => 1,
            ErrorClass::Os => 2,
            ErrorClass::Invalid => 3,
            ErrorClass::Reference => 4,
            ErrorClass::Zlib => 5,
            ErrorClass::Repository => 6,
            ErrorClass::Config => 7,
            ErrorClass::Regex => 8,
            ErrorClass::Odb => 9,
            ErrorClass::Index => 10,
            ErrorClass::Object => 11,
            ErrorClass::Net => 12,
            ErrorClass::Tag => 13,
            ErrorClass::Tree => 14,
            ErrorClass::Indexer => 15,
            ErrorClass::Ssl => 16,
            ErrorClass::Submodule => 17,
            ErrorClass::Thread => 18,
            ErrorClass::Stash => 19,
            ErrorClass::Checkout => 20,
            ErrorClass::FetchHead => 21,
            ErrorClass::Merge => 22,
            ErrorClass::Ssh => 23,
            ErrorClass::Filter => 24,
            ErrorClass::Revert => 25,
            ErrorClass::Callback => 26,
            ErrorClass::CherryPick => 27,
            ErrorClass::Describe => 28,
            ErrorClass::Rebase => 29,
            ErrorClass::Filesystem => 30,
            ErrorClass::Patch => 31,
            ErrorClass::Worktree => 32,
            ErrorClass::Sha1 => 33,
            ErrorClass::Unknown => -1,
        }
    }
}

/// Fine-grained native failure signal.
///
/// Each member's numeric code is fixed by the native engine and round-trips
/// through [`NativeEnum::encode`]. An unrecognized numeric code decodes to
/// [`ErrorCode::Unknown`], never a translation failure. [`ErrorCode::User`]
/// is reserved for the callback bridge's forced stop and is never produced
/// by the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No error.
    Ok,
    /// Generic failure.
    Generic,
    /// Requested object could not be found.
    NotFound,
    /// Object exists, preventing the operation.
    Exists,
    /// More than one object matches.
    Ambiguous,
    /// Output buffer too short to hold data.
    BufferTooShort,
    /// Reserved marker for callback-originated stops.
    User,
    /// Operation not allowed on a bare repository.
    BareRepo,
    /// HEAD refers to a branch with no commits.
    UnbornBranch,
    /// Merge in progress prevented the operation.
    Unmerged,
    /// Reference was not fast-forwardable.
    NonFastForward,
    /// Name or ref spec was not in a valid format.
    InvalidSpec,
    /// Checkout conflicts prevented the operation.
    Conflict,
    /// A lock file prevented the operation.
    Locked,
    /// Reference value does not match expected.
    Modified,
    /// Authentication failure.
    Auth,
    /// The server certificate is invalid.
    Certificate,
    /// Patch or merge has already been applied.
    Applied,
    /// The requested peel operation is not possible.
    Peel,
    /// Unexpected end of file.
    Eof,
    /// Invalid operation or input.
    Invalid,
    /// Uncommitted changes in the index prevented the operation.
    Uncommitted,
    /// The operation is not valid for a directory.
    Directory,
    /// A merge conflict exists and the operation cannot continue.
    MergeConflict,
    /// A user-configured callback refused to act.
    Passthrough,
    /// Signals end of iteration.
    IterOver,
    /// Internal retry signal; never acted on automatically.
    Retry,
    /// Hash sum mismatch in an object.
    HashMismatch,
    /// Unsaved changes in the index would be overwritten.
    IndexDirty,
    /// Patch application failed.
    ApplyFail,
    /// Numeric code not recognized by this crate.
    Unknown,
}

impl NativeEnum for ErrorCode {
    fn decode(raw: c_int) -> ErrorCode {
        match raw {
            raw::GIT_OK => ErrorCode::Ok,
            raw::GIT_ERROR => ErrorCode::Generic,
            raw::GIT_ENOTFOUND => ErrorCode::NotFound,
            raw::GIT_EEXISTS => ErrorCode::Exists,
            raw::GIT_EAMBIGUOUS => ErrorCode::Ambiguous,
            raw::GIT_EBUFS => ErrorCode::BufferTooShort,
            raw::GIT_EUSER => ErrorCode::User,
            raw::GIT_EBAREREPO => ErrorCode::BareRepo,
            raw::GIT_EUNBORNBRANCH => ErrorCode::UnbornBranch,
            raw::GIT_EUNMERGED => ErrorCode::Unmerged,
            raw::GIT_ENONFASTFORWARD => ErrorCode::NonFastForward,
            raw::GIT_EINVALIDSPEC => ErrorCode::InvalidSpec,
            raw::GIT_ECONFLICT => ErrorCode::Conflict,
            raw::GIT_ELOCKED => ErrorCode::Locked,
            raw::GIT_EMODIFIED => ErrorCode::Modified,
            raw::GIT_EAUTH => ErrorCode::Auth,
            raw::GIT_ECERTIFICATE => ErrorCode::Certificate,
            raw::GIT_EAPPLIED => ErrorCode::Applied,
            raw::GIT_EPEEL => ErrorCode::Peel,
            raw::GIT_EEOF => ErrorCode::Eof,
            raw::GIT_EINVALID => ErrorCode::Invalid,
            raw::GIT_EUNCOMMITTED => ErrorCode::Uncommitted,
            raw::GIT_EDIRECTORY => ErrorCode::Directory,
            raw::GIT_EMERGECONFLICT => ErrorCode::MergeConflict,
            raw::GIT_PASSTHROUGH => ErrorCode::Passthrough,
            raw::GIT_ITEROVER => ErrorCode::IterOver,
            raw::GIT_RETRY => ErrorCode::Retry,
            raw::GIT_EMISMATCH => ErrorCode::HashMismatch,
            raw::GIT_EINDEXDIRTY => ErrorCode::IndexDirty,
            raw::GIT_EAPPLYFAIL => ErrorCode::ApplyFail,
            _ => ErrorCode::Unknown,
        }
    }

    fn encode(self) -> c_int {
        match self {
            ErrorCode::Ok => raw::GIT_OK,
            ErrorCode::Generic => raw::GIT_ERROR,
            ErrorCode::NotFound => raw::GIT_ENOTFOUND,
            ErrorCode::Exists => raw::GIT_EEXISTS,
            ErrorCode::Ambiguous => raw::GIT_EAMBIGUOUS,
            ErrorCode::BufferTooShort => raw::GIT_EBUFS,
            ErrorCode::User => raw::GIT_EUSER,
            ErrorCode::BareRepo => raw::GIT_EBAREREPO,
            ErrorCode::UnbornBranch => raw::GIT_EUNBORNBRANCH,
            ErrorCode::Unmerged => raw::GIT_EUNMERGED,
            ErrorCode::NonFastForward => raw::GIT_ENONFASTFORWARD,
            ErrorCode::InvalidSpec => raw::GIT_EINVALIDSPEC,
            ErrorCode::Conflict => raw::GIT_ECONFLICT,
            ErrorCode::Locked => raw::GIT_ELOCKED,
            ErrorCode::Modified => raw::GIT_EMODIFIED,
            ErrorCode::Auth => raw::GIT_EAUTH,
            ErrorCode::Certificate => raw::GIT_ECERTIFICATE,
            ErrorCode::Applied => raw::GIT_EAPPLIED,
            ErrorCode::Peel => raw::GIT_EPEEL,
            ErrorCode::Eof => raw::GIT_EEOF,
            ErrorCode::Invalid => raw::GIT_EINVALID,
            ErrorCode::Uncommitted => raw::GIT_EUNCOMMITTED,
            ErrorCode::Directory => raw::GIT_EDIRECTORY,
            ErrorCode::MergeConflict => raw::GIT_EMERGECONFLICT,
            ErrorCode::Passthrough => raw::GIT_PASSTHROUGH,
            ErrorCode::IterOver => raw::GIT_ITEROVER,
            ErrorCode::Retry => raw::GIT_RETRY,
            ErrorCode::HashMismatch => raw::GIT_EMISMATCH,
            ErrorCode::IndexDirty => raw::GIT_EINDEXDIRTY,
            ErrorCode::ApplyFail => raw::GIT_EAPPLYFAIL,
            ErrorCode::Unknown => -9999,
        }
    }
}

/// Errors from binding operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A native call returned a negative status.
    #[error("{message} ({class:?}, {code:?})")]
    Native {
        /// Coarse origin category from the side-channel, if populated.
        class: ErrorClass,
        /// Fine-grained signal decoded from the status code.
        code: ErrorCode,
        /// Human-readable message for logging.
        message: String,
    },

    /// A handle was used after its release.
    #[error("{what} used after release")]
    UseAfterRelease {
        /// Entity whose handle was dereferenced.
        what: &'static str,
    },

    /// The native object carries the explicit invalid discriminant.
    #[error("unsupported object type (discriminant {kind})")]
    UnsupportedType {
        /// The raw discriminant value.
        kind: i32,
    },

    /// Local precondition violation (null required argument, malformed
    /// input, interior NUL in a string crossing the boundary).
    #[error("invalid state: {message}")]
    InvalidState {
        /// Description of the violated precondition.
        message: String,
    },

    /// A foreach callback returned non-zero to stop iteration. Not a native
    /// failure; the code is the callback's own value, surfaced unchanged.
    #[error("iteration stopped by caller (code {0})")]
    Stopped(i32),
}

impl Error {
    /// The fine-grained native code, for programmatic branching.
    /// `None` for failures that did not originate in the native engine.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Error::Native { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The coarse native origin class, when present.
    pub fn class(&self) -> Option<ErrorClass> {
        match self {
            Error::Native { class, .. } => Some(*class),
            _ => None,
        }
    }
}

impl From<std::ffi::NulError> for Error {
    fn from(err: std::ffi::NulError) -> Error {
        Error::InvalidState {
            message: format!("string crossing the native boundary contains NUL: {err}"),
        }
    }
}

/// Translate a per-call status into a result.
///
/// Non-negative is success. A negative status consults the side-channel
/// exactly once; an unpopulated side-channel still yields a usable
/// code-only failure.
pub(crate) fn check(status: c_int) -> Result<(), Error> {
    if status >= 0 {
        return Ok(());
    }
    Err(last_error(status))
}

/// Build a [`Error::Native`] for a failing status, reading the side-channel.
pub(crate) fn last_error(status: c_int) -> Error {
    let code = ErrorCode::decode(status);
    let (class, message) = unsafe {
        let last = raw::git_error_last();
        if last.is_null() || (*last).message.is_null() {
            (
                ErrorClass::Unknown,
                format!("native call failed with status {status}"),
            )
        } else {
            let message = CStr::from_ptr((*last).message)
                .to_string_lossy()
                .into_owned();
            (ErrorClass::decode((*last).klass), message)
        }
    };
    log::debug!("native failure: status={status} class={class:?} code={code:?}");
    Error::Native {
        class,
        code,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_codes_round_trip() {
        let codes = [
            ErrorCode::Ok,
            ErrorCode::Generic,
            ErrorCode::NotFound,
            ErrorCode::Exists,
            ErrorCode::Ambiguous,
            ErrorCode::BufferTooShort,
            ErrorCode::User,
            ErrorCode::BareRepo,
            ErrorCode::UnbornBranch,
            ErrorCode::Unmerged,
            ErrorCode::NonFastForward,
            ErrorCode::InvalidSpec,
            ErrorCode::Conflict,
            ErrorCode::Locked,
            ErrorCode::Modified,
            ErrorCode::Auth,
            ErrorCode::Certificate,
            ErrorCode::Applied,
            ErrorCode::Peel,
            ErrorCode::Eof,
            ErrorCode::Invalid,
            ErrorCode::Uncommitted,
            ErrorCode::Directory,
            ErrorCode::MergeConflict,
            ErrorCode::Passthrough,
            ErrorCode::IterOver,
            ErrorCode::Retry,
            ErrorCode::HashMismatch,
            ErrorCode::IndexDirty,
            ErrorCode::ApplyFail,
        ];
        for code in codes {
            assert_eq!(ErrorCode::decode(code.encode()), code);
        }
    }

    #[test]
    fn unrecognized_code_decodes_to_unknown() {
        assert_eq!(ErrorCode::decode(-2), ErrorCode::Unknown);
        assert_eq!(ErrorCode::decode(-25), ErrorCode::Unknown);
        assert_eq!(ErrorCode::decode(-9999), ErrorCode::Unknown);
    }

    #[test]
    fn out_of_range_class_never_fails() {
        assert_eq!(ErrorClass::decode(-5), ErrorClass::Unknown);
        assert_eq!(ErrorClass::decode(34), ErrorClass::Unknown);
        assert_eq!(ErrorClass::decode(0), ErrorClass::None);
        assert_eq!(ErrorClass::decode(33), ErrorClass::Sha1);
    }

    #[test]
    fn check_passes_success_statuses() {
        assert!(check(0).is_ok());
        assert!(check(1).is_ok());
    }

    #[test]
    fn native_accessors() {
        let err = Error::Native {
            class: ErrorClass::Repository,
            code: ErrorCode::NotFound,
            message: "missing".into(),
        };
        assert_eq!(err.code(), Some(ErrorCode::NotFound));
        assert_eq!(err.class(), Some(ErrorClass::Repository));
        assert_eq!(Error::Stopped(3).code(), None);
    }
}
