//! callback
//!
//! Bridges native foreach primitives into managed callbacks.
//!
//! The native engine iterates by invoking a supplied function pointer once
//! per record, synchronously on the calling thread, until exhaustion or
//! until the callback returns non-zero. [`Bridge`] is the state carried
//! across one such call:
//!
//! - a non-zero return from the managed callback is propagated to the
//!   engine unchanged as the termination signal, and remembered so it can
//!   be surfaced as [`Error::Stopped`] rather than re-interpreted as a
//!   native error code
//! - a panic inside the managed callback never unwinds across the native
//!   frame; it is caught, remembered, converted into a forced `GIT_EUSER`
//!   stop, and resumed once control is back in Rust
//!
//! The extern "C" trampolines that reconstruct structured arguments live
//! next to each foreach operation; they all funnel through [`Bridge::invoke`]
//! and end with [`Bridge::finish`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use libc::{c_int, c_void};

use crate::error::{self, Error};
use crate::raw;

/// State for one native foreach call wrapping managed callback `F`.
pub(crate) struct Bridge<F> {
    callback: F,
    stop: Option<c_int>,
    panic: Option<Box<dyn Any + Send + 'static>>,
}

impl<F> Bridge<F> {
    pub(crate) fn new(callback: F) -> Bridge<F> {
        Bridge {
            callback,
            stop: None,
            panic: None,
        }
    }

    /// Opaque payload pointer handed to the native foreach.
    pub(crate) fn payload(&mut self) -> *mut c_void {
        self as *mut Bridge<F> as *mut c_void
    }

    /// Run the managed callback for one native record.
    ///
    /// Returns the continuation code handed back to the engine: the
    /// callback's own value (non-zero stops iteration), or a forced
    /// `GIT_EUSER` if the callback panicked.
    pub(crate) fn invoke(&mut self, call: impl FnOnce(&mut F) -> c_int) -> c_int {
        if self.panic.is_some() {
            // A panic is already pending; refuse further upcalls and keep
            // telling the engine to stop.
            return raw::GIT_EUSER;
        }
        match panic::catch_unwind(AssertUnwindSafe(|| call(&mut self.callback))) {
            Ok(code) => {
                if code != 0 {
                    log::trace!("foreach callback requested stop (code {code})");
                    self.stop = Some(code);
                }
                code
            }
            Err(payload) => {
                self.panic = Some(payload);
                raw::GIT_EUSER
            }
        }
    }

    /// Resolve the foreach's overall status once the native call returned.
    ///
    /// A remembered panic resumes here. A remembered user stop wins over
    /// status translation: values produced by user callbacks are never
    /// re-interpreted as native error codes.
    pub(crate) fn finish(self, status: c_int) -> Result<(), Error> {
        if let Some(payload) = self.panic {
            panic::resume_unwind(payload);
        }
        if let Some(code) = self.stop {
            return Err(Error::Stopped(code));
        }
        error::check(status)
    }
}
