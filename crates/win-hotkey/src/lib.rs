//! Thread-bound global hotkeys for Windows.
//!
//! - [`Registry`] owns the descriptor → callback table and allocates ids,
//!   making exactly one OS call per register/unregister.
//! - [`Dispatcher`] resolves `WM_HOTKEY` notifications and runs callbacks in
//!   isolation.
//! - [`HotkeyApi`] is the OS seam; [`Win32Hotkeys`] and [`MessageLoop`]
//!   provide the real implementation on Windows.
#![warn(unsafe_op_in_unsafe_fn)]

mod api;
mod dispatcher;
mod error;
mod registry;
#[cfg(windows)]
mod sys;

#[cfg(any(test, feature = "test-utils"))]
pub use api::{ApiCall, MockHotkeyApi};
pub use api::{HotkeyApi, MOD_NOREPEAT, RegisterOptions};
pub use dispatcher::{DispatchState, Dispatcher, Outcome, WM_HOTKEY};
pub use error::{Error, Result};
pub use registry::{Callback, HotkeyId, OS_ID_MAX, OS_ID_MIN, Registry};
#[cfg(windows)]
pub use sys::{LoopHandle, MessageLoop, Win32Hotkeys};
pub use win_keycode::{Hotkey, ParseError};
