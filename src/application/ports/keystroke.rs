//! Keystroke port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::platform::PasteShortcut;

/// Keystroke errors
#[derive(Debug, Clone, Error)]
pub enum KeystrokeError {
    #[error("{0} not found. Please install it or choose another keystroke tool.")]
    ToolNotFound(String),

    #[error("No keystroke tool available")]
    NoToolAvailable,

    #[error("Failed to send keystroke: {0}")]
    SendFailed(String),
}

/// Port for OS-level input injection
#[async_trait]
pub trait Keystroke: Send + Sync {
    /// Synthesize the paste chord in the currently focused window.
    ///
    /// `Ok` only means the events were dispatched, not that anything was pasted.
    async fn press_paste(&self, shortcut: PasteShortcut) -> Result<(), KeystrokeError>;
}

/// Blanket implementation for boxed keystroke types
#[async_trait]
impl Keystroke for Box<dyn Keystroke> {
    async fn press_paste(&self, shortcut: PasteShortcut) -> Result<(), KeystrokeError> {
        self.as_ref().press_paste(shortcut).await
    }
}
