//! Error types for the damagechat plugin.
use std::{io, path::PathBuf, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type for the plugin crate.
pub type Result<T> = StdResult<T, Error>;

/// Errors raised while installing or driving the plugin.
#[derive(Debug, Error)]
pub enum Error {
    /// Registering or releasing the hotkey failed.
    #[error("hotkey error: {0}")]
    Hotkey(#[from] win_hotkey::Error),

    /// The plugin config could not be loaded.
    #[error("{}", .0.pretty())]
    Config(#[from] config::Error),

    /// The party snapshot file could not be read or decoded.
    #[error("party file {}: {message}", path.display())]
    PartyFile {
        /// File that failed.
        path: PathBuf,
        /// Human-readable error message.
        message: String,
    },

    /// I/O failure while starting a system resource.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
