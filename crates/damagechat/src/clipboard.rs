//! The system clipboard as a `relaykey::Clipboard`.

use relaykey::{Clipboard, Error, Result};
use tracing::trace;

/// Writes text to the OS clipboard through `arboard`.
///
/// A fresh handle is opened per write so the type stays `Send + Sync`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| Error::Clipboard(e.to_string()))?;
        trace!(chars = text.len(), "clipboard_set");
        Ok(())
    }
}
