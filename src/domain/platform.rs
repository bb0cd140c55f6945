//! Host platform identification and paste chords

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ConfigError;

/// Operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl Platform {
    /// The platform this binary was built for
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    /// Keyboard chord that pastes into a terminal on this platform
    pub const fn paste_shortcut(&self) -> PasteShortcut {
        match self {
            Platform::Windows | Platform::Other => PasteShortcut::CtrlV,
            Platform::MacOs => PasteShortcut::CmdV,
            // Terminals on Linux reserve Ctrl+V for literal-next
            Platform::Linux => PasteShortcut::CtrlShiftV,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "windows"),
            Platform::MacOs => write!(f, "macos"),
            Platform::Linux => write!(f, "linux"),
            Platform::Other => write!(f, "other"),
        }
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" => Ok(Platform::Windows),
            "macos" | "mac" | "darwin" => Ok(Platform::MacOs),
            "linux" => Ok(Platform::Linux),
            _ => Err(ConfigError::ValidationError {
                key: "paste.platform".to_string(),
                message: format!("Invalid value '{}'. Valid options: windows, macos, linux", s),
            }),
        }
    }
}

/// Paste chord synthesized by the keystroke port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteShortcut {
    CtrlV,
    CtrlShiftV,
    CmdV,
}

impl fmt::Display for PasteShortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasteShortcut::CtrlV => write!(f, "ctrl+v"),
            PasteShortcut::CtrlShiftV => write!(f, "ctrl+shift+v"),
            PasteShortcut::CmdV => write!(f, "cmd+v"),
        }
    }
}
