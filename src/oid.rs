//! oid
//!
//! Fixed-size 20-byte content identifier.
//!
//! An [`Oid`] is constructed from raw bytes, parsed from a 40-character hex
//! string, or written by a native call into a pre-allocated out-parameter.
//! Equality is byte-exact.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::raw;

/// A content identifier for a repository object.
#[derive(Copy, Clone)]
pub struct Oid {
    raw: raw::git_oid,
}

impl Oid {
    /// The all-zero sentinel id.
    pub fn zero() -> Oid {
        Oid {
            raw: raw::git_oid {
                id: [0; raw::GIT_OID_RAWSZ],
            },
        }
    }

    /// Construct from exactly 20 raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Oid, Error> {
        if bytes.len() != raw::GIT_OID_RAWSZ {
            return Err(Error::InvalidState {
                message: format!(
                    "object id requires {} bytes, got {}",
                    raw::GIT_OID_RAWSZ,
                    bytes.len()
                ),
            });
        }
        let mut id = [0; raw::GIT_OID_RAWSZ];
        id.copy_from_slice(bytes);
        Ok(Oid {
            raw: raw::git_oid { id },
        })
    }

    /// Copy out of a native id pointer. The pointer must be valid.
    pub(crate) unsafe fn from_ptr(oid: *const raw::git_oid) -> Oid {
        debug_assert!(!oid.is_null());
        Oid { raw: *oid }
    }

    /// Native view, for passing into calls.
    pub(crate) fn as_raw(&self) -> *const raw::git_oid {
        &self.raw
    }

    /// Mutable native view, for out-parameters.
    pub(crate) fn as_raw_mut(&mut self) -> *mut raw::git_oid {
        &mut self.raw
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; raw::GIT_OID_RAWSZ] {
        &self.raw.id
    }

    /// Whether this is the all-zero sentinel.
    pub fn is_zero(&self) -> bool {
        self.raw.id.iter().all(|&b| b == 0)
    }
}

impl FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Oid, Error> {
        if s.len() != raw::GIT_OID_HEXSZ {
            return Err(Error::InvalidState {
                message: format!("invalid object id: {s:?}"),
            });
        }
        let bytes = hex::decode(s).map_err(|_| Error::InvalidState {
            message: format!("invalid object id: {s:?}"),
        })?;
        Oid::from_bytes(&bytes)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.raw.id))
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", hex::encode(self.raw.id))
    }
}

impl PartialEq for Oid {
    fn eq(&self, other: &Oid) -> bool {
        self.raw.id == other.raw.id
    }
}

impl Eq for Oid {}

impl std::hash::Hash for Oid {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.id.hash(state);
    }
}
