//! Paste chord through an external input tool (xdotool on X11, wtype on Wayland)

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{Keystroke, KeystrokeError};
use crate::domain::platform::PasteShortcut;

use super::factory::KeystrokeTool;

/// Keystroke adapter that shells out to a chord-capable tool
pub struct CommandKeystroke {
    tool: KeystrokeTool,
}

impl CommandKeystroke {
    pub fn xdotool() -> Self {
        Self {
            tool: KeystrokeTool::Xdotool,
        }
    }

    pub fn wtype() -> Self {
        Self {
            tool: KeystrokeTool::Wtype,
        }
    }

    pub fn tool(&self) -> KeystrokeTool {
        self.tool
    }

    /// Program and arguments pressing `shortcut`
    fn argv(&self, shortcut: PasteShortcut) -> (&'static str, Vec<&'static str>) {
        match self.tool {
            KeystrokeTool::Wtype => {
                let mut args = Vec::new();
                let held: &[&str] = match shortcut {
                    PasteShortcut::CtrlV => &["ctrl"],
                    PasteShortcut::CtrlShiftV => &["ctrl", "shift"],
                    PasteShortcut::CmdV => &["logo"],
                };
                for m in held {
                    args.extend(["-M", *m]);
                }
                args.extend(["-k", "v"]);
                for m in held.iter().rev() {
                    args.extend(["-m", *m]);
                }
                ("wtype", args)
            }
            // Enigo never goes through here; treat it like xdotool.
            KeystrokeTool::Xdotool | KeystrokeTool::Enigo => {
                let chord = match shortcut {
                    PasteShortcut::CtrlV => "ctrl+v",
                    PasteShortcut::CtrlShiftV => "ctrl+shift+v",
                    PasteShortcut::CmdV => "super+v",
                };
                ("xdotool", vec!["key", "--clearmodifiers", chord])
            }
        }
    }
}

#[async_trait]
impl Keystroke for CommandKeystroke {
    async fn press_paste(&self, shortcut: PasteShortcut) -> Result<(), KeystrokeError> {
        let (program, args) = self.argv(shortcut);
        debug!(program, ?args, "pressing paste chord");

        let status = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    KeystrokeError::ToolNotFound(program.to_string())
                } else {
                    KeystrokeError::SendFailed(e.to_string())
                }
            })?;

        if !status.success() {
            return Err(KeystrokeError::SendFailed(format!(
                "{} exited with status: {}",
                program, status
            )));
        }

        Ok(())
    }
}
