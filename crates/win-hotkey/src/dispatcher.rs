//! Routes `WM_HOTKEY` notifications to registered callbacks.

use std::{
    any::Any,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use tracing::{error, trace};

use crate::{HotkeyId, Registry};

/// Message code the OS posts when a registered hotkey is pressed.
pub const WM_HOTKEY: u32 = 0x0312;

/// Result of dispatching one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The callback ran to completion.
    Fired(HotkeyId),
    /// No live registration matched; nothing ran.
    Dropped,
    /// The callback panicked. The panic was caught and logged.
    Panicked(HotkeyId),
}

/// Dispatcher state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// Waiting for a notification.
    Idle,
    /// Inside at least one callback.
    Dispatching,
}

/// Increments a depth counter for the lifetime of the guard.
struct DepthGuard<'a>(&'a AtomicUsize);

impl<'a> DepthGuard<'a> {
    /// Enter one level.
    fn enter(depth: &'a AtomicUsize) -> Self {
        depth.fetch_add(1, Ordering::SeqCst);
        Self(depth)
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Best-effort text of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "<non-string panic>"
    }
}

/// Invokes callbacks for hotkey notifications on the delivering thread.
///
/// Each callback is isolated with `catch_unwind`, so a panicking callback
/// never reaches the message loop and never affects later dispatches.
pub struct Dispatcher {
    /// Where notifications are resolved.
    registry: Arc<Registry>,
    /// Nesting depth of running callbacks.
    depth: AtomicUsize,
}

impl Dispatcher {
    /// Create a dispatcher over `registry`.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            depth: AtomicUsize::new(0),
        }
    }

    /// The registry this dispatcher resolves against.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Current state.
    pub fn state(&self) -> DispatchState {
        if self.depth.load(Ordering::SeqCst) == 0 {
            DispatchState::Idle
        } else {
            DispatchState::Dispatching
        }
    }

    /// Message-loop hook. Returns true if `msg` was a hotkey notification.
    pub fn on_message(&self, msg: u32, wparam: usize) -> bool {
        if msg != WM_HOTKEY {
            return false;
        }
        // wParam carries the registration id; system ids are negative.
        self.dispatch(wparam as i32);
        true
    }

    /// Run the callback bound to `os_id`, if any.
    pub fn dispatch(&self, os_id: i32) -> Outcome {
        let Some((id, callback)) = self.registry.lookup(os_id) else {
            trace!(os_id, "hotkey_dropped_unknown_id");
            return Outcome::Dropped;
        };
        let _depth = DepthGuard::enter(&self.depth);
        trace!(id = %id, os_id, "dispatching_hotkey");
        match catch_unwind(AssertUnwindSafe(|| callback())) {
            Ok(()) => Outcome::Fired(id),
            Err(payload) => {
                error!(
                    id = %id,
                    os_id,
                    panic = panic_message(payload.as_ref()),
                    "hotkey_callback_panicked"
                );
                Outcome::Panicked(id)
            }
        }
    }
}
