//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod clipboard;
pub mod config;
pub mod keystroke;
pub mod notifier;

// Re-export common types
pub use clipboard::{Clipboard, ClipboardError};
pub use config::ConfigStore;
pub use keystroke::{Keystroke, KeystrokeError};
pub use notifier::{NoticeKind, NotificationError, Notifier};
