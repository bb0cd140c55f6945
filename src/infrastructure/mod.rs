//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces and the host
//! adapters that expose real terminals to the dispatcher.

pub mod clipboard;
pub mod config;
pub mod host;
pub mod keystroke;
pub mod notification;

// Re-export adapters
pub use clipboard::{create_clipboard, ArboardClipboard};
pub use config::XdgConfigStore;
pub use host::{WeztermError, WeztermHost};
pub use keystroke::{create_keystroke, KeystrokeTool, KeystrokeToolPreference, NoOpKeystroke};
pub use notification::{create_notifier, NotifyRustNotifier};
