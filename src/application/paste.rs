//! Synthetic paste fallback
//!
//! Last resort when no programmatic path reached the terminal: put the payload
//! on the clipboard, ask the host to bring the terminal forward, wait for focus
//! to settle, then press the platform paste chord.
//!
//! The settle delay is a timing assumption. The activation member only has to
//! request focus and return; adapters must not wait for the window system.
//! Nothing confirms that focus actually landed on the terminal input before
//! the chord is pressed, nor that the terminal rendered the pasted text.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::config::{AppConfig, DEFAULT_SETTLE_DELAY_MS};
use crate::domain::delivery::Outcome;
use crate::domain::payload::Payload;
use crate::domain::platform::Platform;
use crate::host::ObjectRef;

use super::ports::{Clipboard, Keystroke};
use super::probe::try_invoke_any;
use super::strategy::vocab;

/// Clipboard + activation + paste chord
pub struct PasteFallback<C, K>
where
    C: Clipboard,
    K: Keystroke,
{
    clipboard: C,
    keystroke: K,
    enabled: bool,
    sanctioned: Platform,
    platform: Platform,
    settle_delay: Duration,
}

impl<C, K> PasteFallback<C, K>
where
    C: Clipboard,
    K: Keystroke,
{
    /// Fallback sanctioned on `sanctioned` only, running on the current platform
    pub fn new(clipboard: C, keystroke: K, sanctioned: Platform) -> Self {
        Self {
            clipboard,
            keystroke,
            enabled: true,
            sanctioned,
            platform: Platform::current(),
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
        }
    }

    /// Build from configuration
    pub fn from_config(clipboard: C, keystroke: K, config: &AppConfig) -> Self {
        Self::new(clipboard, keystroke, config.paste_platform_or_default())
            .with_enabled(config.paste_enabled_or_default())
            .with_settle_delay(Duration::from_millis(config.settle_delay_ms_or_default()))
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Pretend to run on `platform` instead of the build target
    pub fn on_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Whether this fallback may run at all
    pub fn is_applicable(&self) -> bool {
        self.enabled && self.platform == self.sanctioned
    }

    /// Run the fallback. `Delivered` is optimistic: it means the chord was dispatched.
    pub async fn paste(&self, target: &ObjectRef, payload: &Payload) -> Outcome {
        if !self.is_applicable() {
            debug!(
                enabled = self.enabled,
                platform = %self.platform,
                sanctioned = %self.sanctioned,
                "synthetic paste not applicable"
            );
            return Outcome::NotApplicable;
        }

        if let Err(e) = self.clipboard.copy(payload.as_str()).await {
            warn!(error = %e, "synthetic paste: clipboard write failed");
            return Outcome::NotApplicable;
        }

        // Returns once focus is requested; the settle delay covers the rest
        if try_invoke_any(target.as_ref(), vocab::ACTIVATE, &[]).is_none() {
            debug!("synthetic paste: target exposes no activation member");
        }

        tokio::time::sleep(self.settle_delay).await;

        let shortcut = self.platform.paste_shortcut();
        match self.keystroke.press_paste(shortcut).await {
            Ok(()) => {
                info!(%shortcut, "synthetic paste dispatched");
                Outcome::Delivered
            }
            Err(e) => {
                warn!(%shortcut, error = %e, "synthetic paste: keystroke failed");
                Outcome::NotApplicable
            }
        }
    }
}
