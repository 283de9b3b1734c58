//! handle
//!
//! Thread-safe wrapper around one opaque native address.
//!
//! Every context object and object view in this crate owns exactly one
//! [`Handle`]. The null pointer is the released sentinel: a handle that has
//! been released rejects every operation except release itself, and release
//! is an atomic swap so the native free fires at most once no matter how many
//! threads race it.
//!
//! A handle is either *owned* (release calls the native free) or *borrowed*
//! (the address belongs to another object, e.g. the repository returned by an
//! owner lookup; release only clears the slot). Borrowed handles carry the
//! same use-after-release protection without double-freeing native memory.

use std::sync::atomic::{AtomicPtr, Ordering};

use crate::error::Error;

/// One opaque native address with at-most-once release semantics.
pub(crate) struct Handle<T> {
    ptr: AtomicPtr<T>,
    owned: bool,
    /// Entity name used in use-after-release diagnostics.
    what: &'static str,
}

impl<T> Handle<T> {
    /// Wrap an owned, non-null native address.
    pub(crate) fn new(ptr: *mut T, what: &'static str) -> Handle<T> {
        debug_assert!(!ptr.is_null(), "{what}: acquired a null native address");
        Handle {
            ptr: AtomicPtr::new(ptr),
            owned: true,
            what,
        }
    }

    /// Wrap an address whose native lifetime belongs to another object.
    /// Release clears the slot but never frees.
    pub(crate) fn borrowed(ptr: *mut T, what: &'static str) -> Handle<T> {
        Handle {
            ptr: AtomicPtr::new(ptr),
            owned: false,
            what,
        }
    }

    /// The live address, or [`Error::UseAfterRelease`] once released.
    ///
    /// Safe to call from any thread; callers must still not race a mutating
    /// native call against a release (native-layer contract).
    pub(crate) fn get(&self) -> Result<*mut T, Error> {
        let ptr = self.ptr.load(Ordering::SeqCst);
        if ptr.is_null() {
            return Err(Error::UseAfterRelease { what: self.what });
        }
        Ok(ptr)
    }

    /// Atomically read and clear the address, transferring ownership of
    /// whatever was stored. Returns null if already released.
    pub(crate) fn take(&self) -> *mut T {
        self.ptr.swap(std::ptr::null_mut(), Ordering::SeqCst)
    }

    /// Release the handle, invoking `free` on the previous address exactly
    /// once. A second release is a no-op, never a failure.
    pub(crate) fn release_with(&self, free: unsafe extern "C" fn(*mut T)) {
        let ptr = self.take();
        if !ptr.is_null() && self.owned {
            unsafe { free(ptr) }
        }
    }
}

impl<T> std::fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("what", &self.what)
            .field("ptr", &self.ptr.load(Ordering::SeqCst))
            .field("owned", &self.owned)
            .finish()
    }
}
