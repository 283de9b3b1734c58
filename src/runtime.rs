//! runtime
//!
//! Process-wide native engine initialization.
//!
//! libgit2 requires `git_libgit2_init` before any other call. Every public
//! entry point that reaches the native layer funnels through [`init`], which
//! is guarded by a `Once`. The engine is intentionally never shut down: the
//! native global state lives for the process lifetime, so handles can be
//! dropped in any order during process teardown.

use std::sync::Once;

use crate::codec::Features;
use crate::raw;

static INIT: Once = Once::new();

/// Initialize the native engine exactly once.
///
/// Called internally before every operation that crosses the boundary.
/// Panics if the engine cannot initialize, since no native call can ever
/// succeed afterwards.
pub(crate) fn init() {
    INIT.call_once(|| {
        let rc = unsafe { raw::git_libgit2_init() };
        assert!(rc >= 0, "libgit2 failed to initialize (status {rc})");
    });
}

/// Version of the linked native engine as (major, minor, patch).
pub fn version() -> (i32, i32, i32) {
    init();
    let mut major = 0;
    let mut minor = 0;
    let mut rev = 0;
    unsafe {
        raw::git_libgit2_version(&mut major, &mut minor, &mut rev);
    }
    (major, minor, rev)
}

/// Optional capabilities compiled into the linked engine. Unknown bits
/// reported by a newer engine are dropped.
pub fn features() -> Features {
    init();
    Features::from_bits_truncate(unsafe { raw::git_libgit2_features() } as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nonzero() {
        let (major, minor, _) = version();
        assert!(major > 0 || minor > 0);
    }

    #[test]
    fn vendored_engine_is_threadsafe() {
        assert!(features().contains(Features::THREADS));
    }
}
