//! Configuration for the damagechat plugin (`config.json`).
//!
//! The file names the hotkey either as a full descriptor (`"hotkey"`) or, in
//! the older format, as a bare key (`"HotKey"`) with Ctrl+Shift implied.
#![warn(unsafe_op_in_unsafe_fn)]

mod error;
mod loader;
mod plugin;

pub use error::Error;
pub use loader::{load_from_path, load_from_str};
pub use plugin::{DEFAULT_STEP_DELAY_MS, PluginConfig};
