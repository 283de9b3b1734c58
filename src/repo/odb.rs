//! Object database context object.

use libc::{c_int, c_void};

use crate::callback::Bridge;
use crate::codec::NativeEnum;
use crate::error::{self, Error};
use crate::handle::Handle;
use crate::object::ObjectKind;
use crate::oid::Oid;
use crate::raw;

/// The object database backing a repository.
pub struct Odb {
    handle: Handle<raw::git_odb>,
}

impl std::fmt::Debug for Odb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Odb").field("handle", &self.handle).finish()
    }
}

impl Odb {
    pub(crate) fn from_raw(ptr: *mut raw::git_odb) -> Odb {
        Odb {
            handle: Handle::new(ptr, "object database"),
        }
    }

    /// Whether an object with this id exists in any backend.
    pub fn exists(&self, id: &Oid) -> Result<bool, Error> {
        let db = self.handle.get()?;
        Ok(unsafe { raw::git_odb_exists(db, id.as_raw()) } == 1)
    }

    /// Size and kind of an object without reading its full contents.
    pub fn read_header(&self, id: &Oid) -> Result<(usize, ObjectKind), Error> {
        let db = self.handle.get()?;
        let mut len = 0;
        let mut kind = raw::GIT_OBJECT_INVALID;
        unsafe {
            error::check(raw::git_odb_read_header(
                &mut len,
                &mut kind,
                db,
                id.as_raw(),
            ))?;
        }
        Ok((len, ObjectKind::decode(kind)))
    }

    /// Invoke `callback` with the id of every object in the database, in
    /// no particular order. Returning non-zero stops iteration and
    /// surfaces as [`Error::Stopped`].
    pub fn oid_foreach<F>(&self, callback: F) -> Result<(), Error>
    where
        F: FnMut(Oid) -> i32,
    {
        let db = self.handle.get()?;
        let mut bridge = Bridge::new(callback);
        let status =
            unsafe { raw::git_odb_foreach(db, Some(oid_trampoline::<F>), bridge.payload()) };
        bridge.finish(status)
    }

    /// Release the native handle now instead of at drop.
    pub fn close(&self) {
        self.handle.release_with(raw::git_odb_free);
    }
}

impl Drop for Odb {
    fn drop(&mut self) {
        self.close();
    }
}

unsafe extern "C" fn oid_trampoline<F>(id: *const raw::git_oid, payload: *mut c_void) -> c_int
where
    F: FnMut(Oid) -> i32,
{
    let bridge = &mut *(payload as *mut Bridge<F>);
    let id = Oid::from_ptr(id);
    bridge.invoke(|cb| cb(id))
}
