//! Notification port interface

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Notification errors
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Failed to show notification: {0}")]
    SendFailed(String),
}

/// What a delivery notice reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The reference reached the terminal
    Delivered,
    /// Nothing reached the terminal; the user has to paste by hand
    Undelivered,
}

impl NoticeKind {
    /// Freedesktop icon name
    pub const fn icon_name(&self) -> &'static str {
        match self {
            Self::Delivered => "utilities-terminal",
            Self::Undelivered => "dialog-warning",
        }
    }

    /// How long the notice stays up. Failures linger so the hint can be read.
    pub const fn timeout(&self) -> Duration {
        match self {
            Self::Delivered => Duration::from_secs(3),
            Self::Undelivered => Duration::from_secs(10),
        }
    }
}

/// Port for desktop notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show a notice titled `title` with `body`.
    async fn notify(&self, title: &str, body: &str, kind: NoticeKind)
        -> Result<(), NotificationError>;
}

#[async_trait]
impl Notifier for Box<dyn Notifier> {
    async fn notify(
        &self,
        title: &str,
        body: &str,
        kind: NoticeKind,
    ) -> Result<(), NotificationError> {
        self.as_ref().notify(title, body, kind).await
    }
}
