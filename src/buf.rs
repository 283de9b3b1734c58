//! buf
//!
//! RAII wrapper over the native-owned growable byte region written by
//! value-producing calls. A `Buf` lives only for the single call that filled
//! it: the contents are copied out before the wrapper drops, and the native
//! region is disposed exactly once on drop.

use std::ffi::CStr;

use crate::raw;

pub(crate) struct Buf {
    raw: raw::git_buf,
}

impl Buf {
    /// An empty buffer ready to be written by a native call.
    pub(crate) fn new() -> Buf {
        Buf {
            raw: raw::git_buf {
                ptr: std::ptr::null_mut(),
                reserved: 0,
                size: 0,
            },
        }
    }

    /// Out-parameter view for the producing call.
    pub(crate) fn as_raw_mut(&mut self) -> *mut raw::git_buf {
        &mut self.raw
    }

    /// The filled bytes; empty if the call wrote nothing.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        if self.raw.ptr.is_null() {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(self.raw.ptr as *const u8, self.raw.size) }
    }

    /// Copy out as an owned string, replacing invalid UTF-8.
    pub(crate) fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).into_owned()
    }
}

impl Drop for Buf {
    fn drop(&mut self) {
        unsafe { raw::git_buf_dispose(&mut self.raw) }
    }
}

/// Copy a borrowed native C string, if present.
pub(crate) unsafe fn c_str_to_string(ptr: *const libc::c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
}
