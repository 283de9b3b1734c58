//! codec
//!
//! Symmetric, tolerant conversion between native integer discriminants and
//! structured values.
//!
//! Two shapes cross the boundary:
//!
//! - closed enumerations, carried as a single small integer. Decoding is
//!   total: every enum names an explicit fallback member for values outside
//!   the known set, so translation itself never fails. Encoding returns the
//!   fixed native discriminant, and recognized values round-trip.
//! - bit-flag sets, carried as an OR of single-bit masks. Composition is
//!   bitwise OR; decomposition tests each known mask and drops unrecognized
//!   bits. The drop is deliberate: the engine may set bits this crate does
//!   not know about, and a lossy read is the documented behavior.

use bitflags::bitflags;
use libc::c_int;

/// Conversion between a closed enumeration and its native discriminant.
///
/// `decode` is total and never fails; values outside the known set map to
/// the implementing type's documented fallback member. `encode` returns the
/// fixed native value, so `decode(encode(x)) == x` for every member except
/// the fallback itself.
pub trait NativeEnum: Sized + Copy {
    /// Decode a native discriminant, falling back for unknown values.
    fn decode(raw: c_int) -> Self;

    /// The fixed native discriminant for this member.
    fn encode(self) -> c_int;
}

bitflags! {
    /// Flags for the extended repository open operation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenFlags: u32 {
        /// Only open the repository if it can be immediately found at the
        /// start path; do not walk up parent directories.
        const NO_SEARCH = crate::raw::GIT_REPOSITORY_OPEN_NO_SEARCH;
        /// Continue searching across filesystem boundaries.
        const CROSS_FS = crate::raw::GIT_REPOSITORY_OPEN_CROSS_FS;
        /// Open as bare regardless of configuration, deferring config load.
        const BARE = crate::raw::GIT_REPOSITORY_OPEN_BARE;
        /// Do not try appending `/.git` to the start path.
        const NO_DOTGIT = crate::raw::GIT_REPOSITORY_OPEN_NO_DOTGIT;
        /// Respect the environment variables used by the git command-line
        /// tools; overrides the other flags and the ceiling list.
        const FROM_ENV = crate::raw::GIT_REPOSITORY_OPEN_FROM_ENV;
    }
}

bitflags! {
    /// Flags for the extended repository init operation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InitFlags: u32 {
        /// Create a bare repository with no working directory.
        const BARE = crate::raw::GIT_REPOSITORY_INIT_BARE;
        /// Fail if the path already appears to be a repository.
        const NO_REINIT = crate::raw::GIT_REPOSITORY_INIT_NO_REINIT;
        /// The given path is the git directory itself, not its parent.
        const NO_DOTGIT_DIR = crate::raw::GIT_REPOSITORY_INIT_NO_DOTGIT_DIR;
        /// Make the git directory's parent if it does not exist.
        const MKDIR = crate::raw::GIT_REPOSITORY_INIT_MKDIR;
        /// Recursively make all components of the repository path.
        const MKPATH = crate::raw::GIT_REPOSITORY_INIT_MKPATH;
        /// Use an external template directory.
        const EXTERNAL_TEMPLATE = crate::raw::GIT_REPOSITORY_INIT_EXTERNAL_TEMPLATE;
        /// Write the gitlink file with a relative path.
        const RELATIVE_GITLINK = crate::raw::GIT_REPOSITORY_INIT_RELATIVE_GITLINK;
    }
}

bitflags! {
    /// Optional capabilities compiled into the native engine.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Features: u32 {
        /// The engine was built threadsafe.
        const THREADS = crate::raw::GIT_FEATURE_THREADS;
        /// HTTPS remote transport support.
        const HTTPS = crate::raw::GIT_FEATURE_HTTPS;
        /// SSH remote transport support.
        const SSH = crate::raw::GIT_FEATURE_SSH;
        /// Sub-second file timestamp resolution.
        const NSEC = crate::raw::GIT_FEATURE_NSEC;
    }
}

/// Permission scheme for a newly initialized repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMode {
    /// Use permissions indicated by the umask.
    SharedUmask,
    /// Group-writable (`core.sharedRepository=group`).
    SharedGroup,
    /// World-readable and group-writable (`core.sharedRepository=all`).
    SharedAll,
    /// An explicit mode value.
    Custom(u32),
}

impl InitMode {
    pub(crate) fn bits(self) -> u32 {
        match self {
            InitMode::SharedUmask => crate::raw::GIT_REPOSITORY_INIT_SHARED_UMASK,
            InitMode::SharedGroup => crate::raw::GIT_REPOSITORY_INIT_SHARED_GROUP,
            InitMode::SharedAll => crate::raw::GIT_REPOSITORY_INIT_SHARED_ALL,
            InitMode::Custom(mode) => mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_flags_round_trip() {
        let set = OpenFlags::NO_SEARCH | OpenFlags::BARE | OpenFlags::FROM_ENV;
        assert_eq!(OpenFlags::from_bits_truncate(set.bits()), set);
        assert_eq!(set.bits(), 0b10101);
    }

    #[test]
    fn init_flags_round_trip() {
        let set = InitFlags::MKPATH | InitFlags::NO_REINIT;
        assert_eq!(InitFlags::from_bits_truncate(set.bits()), set);
    }

    #[test]
    fn unrecognized_bits_are_dropped() {
        let bits = OpenFlags::CROSS_FS.bits() | 1 << 30;
        assert_eq!(OpenFlags::from_bits_truncate(bits), OpenFlags::CROSS_FS);
    }

    #[test]
    fn empty_set_is_zero() {
        assert_eq!(OpenFlags::empty().bits(), 0);
        assert_eq!(InitFlags::from_bits_truncate(0), InitFlags::empty());
    }

    #[test]
    fn feature_bits_match_the_native_table() {
        assert_eq!(Features::THREADS.bits(), 1);
        assert_eq!(Features::HTTPS.bits(), 2);
        assert_eq!(Features::SSH.bits(), 4);
        assert_eq!(Features::NSEC.bits(), 8);
        let set = Features::THREADS | Features::HTTPS;
        assert_eq!(Features::from_bits_truncate(set.bits()), set);
    }

    #[test]
    fn init_modes_encode_shared_permissions() {
        assert_eq!(InitMode::SharedUmask.bits(), 0);
        assert_eq!(InitMode::SharedGroup.bits(), 0o2775);
        assert_eq!(InitMode::SharedAll.bits(), 0o2777);
        assert_eq!(InitMode::Custom(0o700).bits(), 0o700);
    }
}
