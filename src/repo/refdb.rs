//! Reference database context object.

use crate::error::{self, Error};
use crate::handle::Handle;
use crate::raw;

/// The reference database backing a repository.
pub struct Refdb {
    handle: Handle<raw::git_refdb>,
}

impl std::fmt::Debug for Refdb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refdb")
            .field("handle", &self.handle)
            .finish()
    }
}

impl Refdb {
    pub(crate) fn from_raw(ptr: *mut raw::git_refdb) -> Refdb {
        Refdb {
            handle: Handle::new(ptr, "reference database"),
        }
    }

    /// Pack loose references into the packed-refs file.
    pub fn compress(&self) -> Result<(), Error> {
        let refdb = self.handle.get()?;
        unsafe { error::check(raw::git_refdb_compress(refdb)) }
    }

    /// Release the native handle now instead of at drop.
    pub fn close(&self) {
        self.handle.release_with(raw::git_refdb_free);
    }
}

impl Drop for Refdb {
    fn drop(&mut self) {
        self.close();
    }
}
