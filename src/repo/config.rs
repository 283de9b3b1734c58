//! Configuration context object.

use std::ffi::CString;
use std::ptr;

use crate::buf::Buf;
use crate::error::{self, Error};
use crate::handle::Handle;
use crate::raw;

/// A configuration view, live or snapshot.
///
/// Live configs re-read files on access and allow writes; a snapshot is a
/// consistent read-only copy. Native validity ends with the owning
/// repository.
pub struct Config {
    handle: Handle<raw::git_config>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("handle", &self.handle)
            .finish()
    }
}

impl Config {
    pub(crate) fn from_raw(ptr: *mut raw::git_config) -> Config {
        Config {
            handle: Handle::new(ptr, "config"),
        }
    }

    /// Value of `name` as an owned string.
    pub fn get_string(&self, name: &str) -> Result<String, Error> {
        let cfg = self.handle.get()?;
        let c_name = CString::new(name)?;
        let mut buf = Buf::new();
        unsafe {
            error::check(raw::git_config_get_string_buf(
                buf.as_raw_mut(),
                cfg,
                c_name.as_ptr(),
            ))?;
        }
        Ok(buf.to_string_lossy())
    }

    /// Set `name` in the highest-priority writable level.
    pub fn set_string(&self, name: &str, value: &str) -> Result<(), Error> {
        let cfg = self.handle.get()?;
        let c_name = CString::new(name)?;
        let c_value = CString::new(value)?;
        unsafe {
            error::check(raw::git_config_set_string(
                cfg,
                c_name.as_ptr(),
                c_value.as_ptr(),
            ))
        }
    }

    /// Value of `name` interpreted with git's boolean rules (`true`,
    /// `yes`, `on`, `1`...).
    pub fn get_bool(&self, name: &str) -> Result<bool, Error> {
        let cfg = self.handle.get()?;
        let c_name = CString::new(name)?;
        let mut out = 0;
        unsafe {
            error::check(raw::git_config_get_bool(&mut out, cfg, c_name.as_ptr()))?;
        }
        Ok(out != 0)
    }

    pub fn set_bool(&self, name: &str, value: bool) -> Result<(), Error> {
        let cfg = self.handle.get()?;
        let c_name = CString::new(name)?;
        unsafe { error::check(raw::git_config_set_bool(cfg, c_name.as_ptr(), value as _)) }
    }

    /// Value of `name` as an integer, honoring `k`/`m`/`g` suffixes.
    pub fn get_i64(&self, name: &str) -> Result<i64, Error> {
        let cfg = self.handle.get()?;
        let c_name = CString::new(name)?;
        let mut out = 0;
        unsafe {
            error::check(raw::git_config_get_int64(&mut out, cfg, c_name.as_ptr()))?;
        }
        Ok(out)
    }

    pub fn set_i64(&self, name: &str, value: i64) -> Result<(), Error> {
        let cfg = self.handle.get()?;
        let c_name = CString::new(name)?;
        unsafe { error::check(raw::git_config_set_int64(cfg, c_name.as_ptr(), value)) }
    }

    /// A read-only, consistent snapshot of this configuration.
    pub fn snapshot(&self) -> Result<Config, Error> {
        let cfg = self.handle.get()?;
        let mut out = ptr::null_mut();
        unsafe {
            error::check(raw::git_config_snapshot(&mut out, cfg))?;
        }
        Ok(Config::from_raw(out))
    }

    /// Release the native handle now instead of at drop.
    pub fn close(&self) {
        self.handle.release_with(raw::git_config_free);
    }
}

impl Drop for Config {
    fn drop(&mut self) {
        self.close();
    }
}
