//! Error types and result alias for the win-hotkey crate.
use std::result::Result as StdResult;

use thiserror::Error;
use win_keycode::ParseError;

use crate::HotkeyId;

/// Convenient result type used throughout this crate.
pub type Result<T> = StdResult<T, Error>;

/// Error variants produced by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The hotkey descriptor was malformed.
    #[error("invalid hotkey: {0}")]
    Parse(#[from] ParseError),
    /// A live registration already uses this modifier set and key.
    #[error("hotkey {0} is already registered")]
    AlreadyRegistered(String),
    /// The OS refused the binding, usually because another process owns it.
    #[error("OS refused hotkey {hotkey}: {reason}")]
    OsRegistration {
        /// Canonical descriptor.
        hotkey: String,
        /// OS-provided reason.
        reason: String,
    },
    /// No live registration has this id.
    #[error("no registration with id {0}")]
    NotFound(HotkeyId),
    /// Every OS-level hotkey id is in use.
    #[error("no free OS hotkey ids")]
    IdsExhausted,
    /// Underlying OS provided an error.
    #[error("OS error: {0}")]
    Os(String),
}
