//! Keystroke infrastructure module
//!
//! Presses the paste chord with enigo (all platforms) or with an external
//! input tool on Linux.

#[cfg(target_os = "linux")]
mod command;
mod enigo;
mod factory;
mod noop;

#[cfg(target_os = "linux")]
pub use command::CommandKeystroke;
pub use enigo::EnigoKeystroke;
pub use factory::{create_keystroke, detect_keystroke_tool, KeystrokeTool, KeystrokeToolPreference};
pub use noop::NoOpKeystroke;
