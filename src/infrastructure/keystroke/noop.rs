//! No-op keystroke adapter

use async_trait::async_trait;

use crate::application::ports::{Keystroke, KeystrokeError};
use crate::domain::platform::PasteShortcut;

/// Keystroke adapter that never presses anything.
///
/// Used when the paste fallback is disabled. It reports failure so a skipped
/// chord is never mistaken for a delivered one.
pub struct NoOpKeystroke;

impl NoOpKeystroke {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpKeystroke {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Keystroke for NoOpKeystroke {
    async fn press_paste(&self, _shortcut: PasteShortcut) -> Result<(), KeystrokeError> {
        Err(KeystrokeError::NoToolAvailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_never_claims_success() {
        assert!(NoOpKeystroke::new()
            .press_paste(PasteShortcut::CtrlV)
            .await
            .is_err());
    }
}
