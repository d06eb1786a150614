//! Explicitly scoped diagnostics context.
//!
//! DESIGN
//! ======
//! Debug tooling wants a handle on the live socket without that handle
//! becoming an ambient global. The context is installed with [`init`], which
//! returns a guard; dropping the guard tears the context down, after which
//! [`with`] returns `None`. Single-threaded by construction (one context per
//! thread), which matches the page's single UI task queue.

#[cfg(test)]
#[path = "diagnostics_test.rs"]
mod diagnostics_test;

use std::cell::RefCell;

use crate::net::socket::EventSender;

thread_local! {
    static CONTEXT: RefCell<Option<Diagnostics>> = const { RefCell::new(None) };
}

/// Debug-only view of client internals.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    /// Outbound handle to the live socket, for poking events from tooling.
    pub socket: EventSender,
}

/// Tears the diagnostics context down when dropped.
pub struct DiagnosticsGuard {
    _private: (),
}

impl Drop for DiagnosticsGuard {
    fn drop(&mut self) {
        CONTEXT.with(|c| *c.borrow_mut() = None);
    }
}

/// Install the diagnostics context for the lifetime of the returned guard.
/// A second `init` replaces the previous context.
#[must_use]
pub fn init(diagnostics: Diagnostics) -> DiagnosticsGuard {
    CONTEXT.with(|c| *c.borrow_mut() = Some(diagnostics));
    DiagnosticsGuard { _private: () }
}

/// Run `f` against the current context, if one is installed.
pub fn with<R>(f: impl FnOnce(&Diagnostics) -> R) -> Option<R> {
    CONTEXT.with(|c| c.borrow().as_ref().map(f))
}
