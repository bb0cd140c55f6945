//! Keystroke tool selection

use std::fmt;
use std::str::FromStr;

#[cfg(target_os = "linux")]
use std::env;
#[cfg(target_os = "linux")]
use std::process::Stdio;

#[cfg(target_os = "linux")]
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{Keystroke, KeystrokeError};
use crate::domain::error::ConfigError;

#[cfg(target_os = "linux")]
use super::command::CommandKeystroke;
use super::enigo::EnigoKeystroke;

/// Concrete tool pressing the paste chord
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeystrokeTool {
    Enigo,
    Xdotool,
    Wtype,
}

impl fmt::Display for KeystrokeTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeystrokeTool::Enigo => write!(f, "enigo"),
            KeystrokeTool::Xdotool => write!(f, "xdotool"),
            KeystrokeTool::Wtype => write!(f, "wtype"),
        }
    }
}

/// User preference for keystroke tool selection.
///
/// - All platforms support `Enigo` (the default).
/// - Linux additionally supports `Auto`, `Xdotool`, and `Wtype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeystrokeToolPreference {
    #[default]
    Enigo,
    /// wtype on Wayland, xdotool on X11, else enigo
    #[cfg(target_os = "linux")]
    Auto,
    #[cfg(target_os = "linux")]
    Xdotool,
    #[cfg(target_os = "linux")]
    Wtype,
}

impl KeystrokeToolPreference {
    #[cfg(target_os = "linux")]
    pub const VALID_OPTIONS: &'static str = "enigo, auto, xdotool, wtype";
    #[cfg(not(target_os = "linux"))]
    pub const VALID_OPTIONS: &'static str = "enigo";
}

impl fmt::Display for KeystrokeToolPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeystrokeToolPreference::Enigo => write!(f, "enigo"),
            #[cfg(target_os = "linux")]
            KeystrokeToolPreference::Auto => write!(f, "auto"),
            #[cfg(target_os = "linux")]
            KeystrokeToolPreference::Xdotool => write!(f, "xdotool"),
            #[cfg(target_os = "linux")]
            KeystrokeToolPreference::Wtype => write!(f, "wtype"),
        }
    }
}

impl FromStr for KeystrokeToolPreference {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "enigo" => Ok(KeystrokeToolPreference::Enigo),
            #[cfg(target_os = "linux")]
            "auto" => Ok(KeystrokeToolPreference::Auto),
            #[cfg(target_os = "linux")]
            "xdotool" => Ok(KeystrokeToolPreference::Xdotool),
            #[cfg(target_os = "linux")]
            "wtype" => Ok(KeystrokeToolPreference::Wtype),
            _ => Err(ConfigError::ValidationError {
                key: "paste.keystroke_tool".to_string(),
                message: format!(
                    "Invalid value '{}'. Valid options: {}",
                    s,
                    KeystrokeToolPreference::VALID_OPTIONS
                ),
            }),
        }
    }
}

/// Check if a tool binary is available using `which`
#[cfg(target_os = "linux")]
async fn is_tool_available(tool: &str) -> bool {
    Command::new("which")
        .arg(tool)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Pick a tool for the running session.
///
/// Wayland sessions prefer wtype, X11 sessions prefer xdotool; enigo otherwise.
pub async fn detect_keystroke_tool() -> KeystrokeTool {
    #[cfg(not(target_os = "linux"))]
    {
        return KeystrokeTool::Enigo;
    }

    #[cfg(target_os = "linux")]
    {
        let wayland = env::var_os("WAYLAND_DISPLAY").is_some();
        let x11 = env::var_os("DISPLAY").is_some();

        if wayland && is_tool_available("wtype").await {
            return KeystrokeTool::Wtype;
        }
        if x11 && is_tool_available("xdotool").await {
            return KeystrokeTool::Xdotool;
        }
        KeystrokeTool::Enigo
    }
}

/// Create a keystroke adapter using the specified preference.
///
/// On non-Linux platforms, always uses Enigo regardless of preference.
pub async fn create_keystroke(
    preference: KeystrokeToolPreference,
) -> Result<(Box<dyn Keystroke>, KeystrokeTool), KeystrokeError> {
    let tool = match preference {
        KeystrokeToolPreference::Enigo => KeystrokeTool::Enigo,
        #[cfg(target_os = "linux")]
        KeystrokeToolPreference::Auto => detect_keystroke_tool().await,
        #[cfg(target_os = "linux")]
        KeystrokeToolPreference::Xdotool => {
            if !is_tool_available("xdotool").await {
                return Err(KeystrokeError::ToolNotFound("xdotool".to_string()));
            }
            KeystrokeTool::Xdotool
        }
        #[cfg(target_os = "linux")]
        KeystrokeToolPreference::Wtype => {
            if !is_tool_available("wtype").await {
                return Err(KeystrokeError::ToolNotFound("wtype".to_string()));
            }
            KeystrokeTool::Wtype
        }
    };

    debug!(%preference, %tool, "keystroke tool selected");
    Ok((adapter_for(tool), tool))
}

fn adapter_for(tool: KeystrokeTool) -> Box<dyn Keystroke> {
    match tool {
        KeystrokeTool::Enigo => Box::new(EnigoKeystroke::new()),
        #[cfg(target_os = "linux")]
        KeystrokeTool::Xdotool => Box::new(CommandKeystroke::xdotool()),
        #[cfg(target_os = "linux")]
        KeystrokeTool::Wtype => Box::new(CommandKeystroke::wtype()),
        #[cfg(not(target_os = "linux"))]
        KeystrokeTool::Xdotool | KeystrokeTool::Wtype => Box::new(EnigoKeystroke::new()),
    }
}
