//! Delivery notices through notify-rust

use async_trait::async_trait;
use notify_rust::{Notification, Timeout};

use crate::application::ports::{NoticeKind, NotificationError, Notifier};

const APP_NAME: &str = "term-courier";

/// Desktop notifier for Windows, macOS and freedesktop sessions
#[derive(Debug, Clone)]
pub struct NotifyRustNotifier {
    app_name: String,
}

impl NotifyRustNotifier {
    pub fn new() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
        }
    }

    fn build(&self, title: &str, body: &str, kind: NoticeKind) -> Notification {
        let mut notification = Notification::new();
        notification
            .appname(&self.app_name)
            .summary(title)
            .body(body)
            .icon(kind.icon_name())
            .timeout(Timeout::Milliseconds(kind.timeout().as_millis() as u32));
        notification
    }
}

impl Default for NotifyRustNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NotifyRustNotifier {
    async fn notify(
        &self,
        title: &str,
        body: &str,
        kind: NoticeKind,
    ) -> Result<(), NotificationError> {
        let notification = self.build(title, body, kind);

        // Showing can block on the session bus
        tokio::task::spawn_blocking(move || {
            notification
                .show()
                .map(|_| ())
                .map_err(|e| NotificationError::SendFailed(e.to_string()))
        })
        .await
        .map_err(|e| NotificationError::SendFailed(format!("Task join error: {}", e)))?
    }
}
