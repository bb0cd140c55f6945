//! Clipboard port interface

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    /// No clipboard service could be reached (no display, no session).
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    /// Another process kept the clipboard open.
    #[error("Clipboard is held by another application")]
    Busy,

    #[error("Failed to write clipboard: {0}")]
    WriteFailed(String),
}

/// Port for the system clipboard.
///
/// The paste fallback and the error reporter both stage the payload here.
/// Last write wins; nothing is locked against concurrent writers.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard content with `text`, byte for byte.
    async fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

#[async_trait]
impl Clipboard for Box<dyn Clipboard> {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        self.as_ref().copy(text).await
    }
}
