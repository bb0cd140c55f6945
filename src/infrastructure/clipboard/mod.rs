//! Clipboard infrastructure module

mod arboard;

pub use arboard::ArboardClipboard;

use crate::application::ports::Clipboard;

/// Create the system clipboard adapter
pub fn create_clipboard() -> Box<dyn Clipboard> {
    Box::new(ArboardClipboard::new())
}
