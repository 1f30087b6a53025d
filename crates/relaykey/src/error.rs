//! Error types and result alias for the relaykey crate.
use std::result::Result as StdResult;

use thiserror::Error;

/// Crate-local `Result` alias using the relay error type.
pub type Result<T> = StdResult<T, Error>;

/// Errors that can occur while synthesizing or posting events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The OS queued fewer events than were submitted in one batch.
    #[error("injection partially failed: {accepted} of {submitted} events queued")]
    InjectionPartialFailure {
        /// Records handed to the OS.
        submitted: usize,
        /// Records the OS reported as queued.
        accepted: usize,
    },
    /// The UI thread that injection is marshalled to is no longer running.
    #[error("UI thread is gone")]
    UiThreadGone,
    /// Writing the clipboard failed.
    #[error("clipboard write failed: {0}")]
    Clipboard(String),
}
