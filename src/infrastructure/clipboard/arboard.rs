//! System clipboard through arboard

use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application::ports::{Clipboard, ClipboardError};

/// Attempts made while another process holds the clipboard open
const BUSY_ATTEMPTS: u32 = 3;
const BUSY_BACKOFF: Duration = Duration::from_millis(25);

/// Clipboard adapter backed by arboard.
///
/// A fresh handle is opened per copy; nothing is held between calls.
#[derive(Debug, Default)]
pub struct ArboardClipboard;

impl ArboardClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Clipboard for ArboardClipboard {
    async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_owned();
        debug!(bytes = text.len(), "staging payload on clipboard");

        tokio::task::spawn_blocking(move || write_text(&text))
            .await
            .map_err(|e| ClipboardError::WriteFailed(format!("Task join error: {}", e)))?
    }
}

/// Blocking write; retries while the clipboard is occupied.
fn write_text(text: &str) -> Result<(), ClipboardError> {
    let mut attempt = 1;
    loop {
        let result = arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text));
        match result.map_err(classify) {
            Err(ClipboardError::Busy) if attempt < BUSY_ATTEMPTS => {
                warn!(attempt, "clipboard busy, retrying");
                thread::sleep(BUSY_BACKOFF * attempt);
                attempt += 1;
            }
            other => return other,
        }
    }
}

fn classify(err: arboard::Error) -> ClipboardError {
    match err {
        arboard::Error::ClipboardOccupied => ClipboardError::Busy,
        arboard::Error::ClipboardNotSupported => ClipboardError::Unavailable(err.to_string()),
        other => ClipboardError::WriteFailed(other.to_string()),
    }
}
