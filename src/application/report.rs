//! Result reporter use case

use tracing::{info, warn};

use crate::domain::delivery::SendResult;
use crate::domain::payload::Payload;

use super::ports::{Clipboard, NoticeKind, Notifier};

const NOTIFY_TITLE: &str = "Term Courier";

/// Side effects performed while reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOutcome {
    pub copied_to_clipboard: bool,
    pub notified: bool,
}

/// Surfaces a `SendResult` to the user.
///
/// On error the payload goes to the clipboard so it can be pasted by hand.
pub struct ResultReporter<C, N>
where
    C: Clipboard,
    N: Notifier,
{
    clipboard: C,
    notifier: N,
    notify: bool,
}

impl<C, N> ResultReporter<C, N>
where
    C: Clipboard,
    N: Notifier,
{
    pub fn new(clipboard: C, notifier: N, notify: bool) -> Self {
        Self {
            clipboard,
            notifier,
            notify,
        }
    }

    /// Never fails; adapter errors are logged and dropped.
    pub async fn report(&self, result: &SendResult, payload: &Payload) -> ReportOutcome {
        let mut outcome = ReportOutcome::default();

        let (message, kind) = match result {
            SendResult::Success(message) => {
                info!(%message, "delivery succeeded");
                (message.clone(), NoticeKind::Delivered)
            }
            SendResult::Error(message) => {
                match self.clipboard.copy(payload.as_str()).await {
                    Ok(()) => outcome.copied_to_clipboard = true,
                    Err(e) => warn!(error = %e, "could not copy payload to clipboard"),
                }
                let message = if outcome.copied_to_clipboard {
                    format!("{} The reference was copied to the clipboard.", message)
                } else {
                    message.clone()
                };
                (message, NoticeKind::Undelivered)
            }
        };

        if self.notify {
            match self.notifier.notify(NOTIFY_TITLE, &message, kind).await {
                Ok(()) => outcome.notified = true,
                Err(e) => warn!(error = %e, "notification failed"),
            }
        }

        outcome
    }
}
