//! Cross-platform paste chord using enigo
//!
//! Works on Windows, macOS, and Linux (X11; Wayland depends on the compositor).

use async_trait::async_trait;
use enigo::{Direction, Enigo, Key, Keyboard, Settings};

use crate::application::ports::{Keystroke, KeystrokeError};
use crate::domain::platform::PasteShortcut;

/// Cross-platform keystroke adapter using enigo
pub struct EnigoKeystroke;

impl EnigoKeystroke {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnigoKeystroke {
    fn default() -> Self {
        Self::new()
    }
}

/// Modifiers held while `v` is clicked
fn modifiers(shortcut: PasteShortcut) -> &'static [Key] {
    match shortcut {
        PasteShortcut::CtrlV => &[Key::Control],
        PasteShortcut::CtrlShiftV => &[Key::Control, Key::Shift],
        PasteShortcut::CmdV => &[Key::Meta],
    }
}

fn press_chord(enigo: &mut Enigo, held: &[Key]) -> Result<(), enigo::InputError> {
    for key in held {
        enigo.key(*key, Direction::Press)?;
    }
    let clicked = enigo.key(Key::Unicode('v'), Direction::Click);
    // Release even if the click failed so no modifier stays stuck.
    for key in held.iter().rev() {
        enigo.key(*key, Direction::Release)?;
    }
    clicked
}

#[async_trait]
impl Keystroke for EnigoKeystroke {
    async fn press_paste(&self, shortcut: PasteShortcut) -> Result<(), KeystrokeError> {
        // enigo operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            let mut enigo = Enigo::new(&Settings::default()).map_err(|e| {
                KeystrokeError::SendFailed(format!("Failed to create enigo: {}", e))
            })?;

            press_chord(&mut enigo, modifiers(shortcut)).map_err(|e| {
                KeystrokeError::SendFailed(format!("Failed to press {}: {}", shortcut, e))
            })
        })
        .await
        .map_err(|e| KeystrokeError::SendFailed(format!("Task join error: {}", e)))?
    }
}
