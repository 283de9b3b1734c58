//! Reference context object.

use std::ptr;

use libc::c_int;

use crate::buf::c_str_to_string;
use crate::codec::NativeEnum;
use crate::error::{self, Error};
use crate::handle::Handle;
use crate::object::{Object, ObjectKind};
use crate::oid::Oid;
use crate::raw;

/// Whether a reference holds an id directly or names another reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Holds an object id.
    Direct,
    /// Names another reference.
    Symbolic,
    /// Fallback for discriminants outside the known set.
    Invalid,
}

impl NativeEnum for ReferenceKind {
    fn decode(raw: c_int) -> ReferenceKind {
        match raw {
            raw::GIT_REFERENCE_DIRECT => ReferenceKind::Direct,
            raw::GIT_REFERENCE_SYMBOLIC => ReferenceKind::Symbolic,
            _ => ReferenceKind::Invalid,
        }
    }

    fn encode(self) -> c_int {
        match self {
            ReferenceKind::Direct => raw::GIT_REFERENCE_DIRECT,
            ReferenceKind::Symbolic => raw::GIT_REFERENCE_SYMBOLIC,
            ReferenceKind::Invalid => raw::GIT_REFERENCE_INVALID,
        }
    }
}

/// A reference (branch, tag, remote-tracking, or HEAD).
pub struct Reference {
    handle: Handle<raw::git_reference>,
}

impl std::fmt::Debug for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reference")
            .field("handle", &self.handle)
            .finish()
    }
}

impl Reference {
    pub(crate) fn from_raw(ptr: *mut raw::git_reference) -> Reference {
        Reference {
            handle: Handle::new(ptr, "reference"),
        }
    }

    /// Full name, e.g. `refs/heads/main`.
    pub fn name(&self) -> Result<String, Error> {
        let reference = self.handle.get()?;
        unsafe { c_str_to_string(raw::git_reference_name(reference)) }.ok_or_else(|| {
            Error::InvalidState {
                message: "reference reports no name".into(),
            }
        })
    }

    /// Human-readable short name, e.g. `main`.
    pub fn shorthand(&self) -> Result<String, Error> {
        let reference = self.handle.get()?;
        unsafe { c_str_to_string(raw::git_reference_shorthand(reference)) }.ok_or_else(|| {
            Error::InvalidState {
                message: "reference reports no shorthand".into(),
            }
        })
    }

    pub fn kind(&self) -> Result<ReferenceKind, Error> {
        let reference = self.handle.get()?;
        Ok(ReferenceKind::decode(unsafe {
            raw::git_reference_type(reference)
        }))
    }

    /// The id a direct reference points at; `None` for symbolic ones.
    pub fn target(&self) -> Result<Option<Oid>, Error> {
        let reference = self.handle.get()?;
        let oid = unsafe { raw::git_reference_target(reference) };
        if oid.is_null() {
            return Ok(None);
        }
        Ok(Some(unsafe { Oid::from_ptr(oid) }))
    }

    /// The name a symbolic reference points at; `None` for direct ones.
    pub fn symbolic_target(&self) -> Result<Option<String>, Error> {
        let reference = self.handle.get()?;
        Ok(unsafe { c_str_to_string(raw::git_reference_symbolic_target(reference)) })
    }

    /// Follow symbolic links until a direct reference is reached.
    pub fn resolve(&self) -> Result<Reference, Error> {
        let reference = self.handle.get()?;
        let mut out = ptr::null_mut();
        unsafe {
            error::check(raw::git_reference_resolve(&mut out, reference))?;
        }
        Ok(Reference::from_raw(out))
    }

    /// Recursively peel until an object of `kind` is reached; `kind` of
    /// [`ObjectKind::Any`] stops at the first non-tag object.
    pub fn peel(&self, kind: ObjectKind) -> Result<Object, Error> {
        let reference = self.handle.get()?;
        let mut out = ptr::null_mut();
        unsafe {
            error::check(raw::git_reference_peel(&mut out, reference, kind.encode()))?;
            Object::from_raw(out)
        }
    }

    /// Whether the name is under `refs/heads/`.
    pub fn is_branch(&self) -> Result<bool, Error> {
        let reference = self.handle.get()?;
        Ok(unsafe { raw::git_reference_is_branch(reference) } == 1)
    }

    /// Whether the name is under `refs/remotes/`.
    pub fn is_remote(&self) -> Result<bool, Error> {
        let reference = self.handle.get()?;
        Ok(unsafe { raw::git_reference_is_remote(reference) } == 1)
    }

    /// Whether the name is under `refs/tags/`.
    pub fn is_tag(&self) -> Result<bool, Error> {
        let reference = self.handle.get()?;
        Ok(unsafe { raw::git_reference_is_tag(reference) } == 1)
    }

    /// Release the native handle now instead of at drop.
    pub fn close(&self) {
        self.handle.release_with(raw::git_reference_free);
    }
}

impl Drop for Reference {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_kind_codec_round_trips() {
        assert_eq!(
            ReferenceKind::decode(ReferenceKind::Direct.encode()),
            ReferenceKind::Direct
        );
        assert_eq!(
            ReferenceKind::decode(ReferenceKind::Symbolic.encode()),
            ReferenceKind::Symbolic
        );
    }

    #[test]
    fn unknown_discriminants_fall_back_to_invalid() {
        assert_eq!(ReferenceKind::decode(0), ReferenceKind::Invalid);
        assert_eq!(ReferenceKind::decode(3), ReferenceKind::Invalid);
        assert_eq!(ReferenceKind::decode(-1), ReferenceKind::Invalid);
    }
}
