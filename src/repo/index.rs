//! Index (staging area) context object.

use std::path::{Path, PathBuf};

use crate::buf::c_str_to_string;
use crate::error::{self, Error};
use crate::handle::Handle;
use crate::raw;
use crate::repo::path_to_cstring;

/// The index file (staging area) of a repository.
pub struct Index {
    handle: Handle<raw::git_index>,
}

impl std::fmt::Debug for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Index")
            .field("handle", &self.handle)
            .finish()
    }
}

impl Index {
    pub(crate) fn from_raw(ptr: *mut raw::git_index) -> Index {
        Index {
            handle: Handle::new(ptr, "index"),
        }
    }

    /// Number of entries currently staged.
    pub fn entry_count(&self) -> Result<usize, Error> {
        let index = self.handle.get()?;
        Ok(unsafe { raw::git_index_entrycount(index) })
    }

    /// Stage the file at `path` (relative to the working directory),
    /// writing its blob to the object database.
    pub fn add_path(&self, path: &Path) -> Result<(), Error> {
        let index = self.handle.get()?;
        let c_path = path_to_cstring(path)?;
        unsafe { error::check(raw::git_index_add_bypath(index, c_path.as_ptr())) }
    }

    /// Write the in-memory index back to disk.
    pub fn write(&self) -> Result<(), Error> {
        let index = self.handle.get()?;
        unsafe { error::check(raw::git_index_write(index)) }
    }

    /// Update the in-memory index from disk. With `force`, discard
    /// in-memory changes even if the on-disk file is unchanged.
    pub fn read(&self, force: bool) -> Result<(), Error> {
        let index = self.handle.get()?;
        unsafe { error::check(raw::git_index_read(index, force as _)) }
    }

    /// Whether any entries record a merge conflict.
    pub fn has_conflicts(&self) -> Result<bool, Error> {
        let index = self.handle.get()?;
        Ok(unsafe { raw::git_index_has_conflicts(index) } == 1)
    }

    /// On-disk path of the index file, absent for in-memory indexes.
    pub fn path(&self) -> Result<Option<PathBuf>, Error> {
        let index = self.handle.get()?;
        Ok(unsafe { c_str_to_string(raw::git_index_path(index)) }.map(PathBuf::from))
    }

    /// Release the native handle now instead of at drop.
    pub fn close(&self) {
        self.handle.release_with(raw::git_index_free);
    }
}

impl Drop for Index {
    fn drop(&mut self) {
        self.close();
    }
}
