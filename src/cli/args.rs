//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::payload::LineSpan;

/// term-courier - send code references to a terminal session
#[derive(Parser, Debug)]
#[command(name = "term-courier")]
#[command(version)]
#[command(about = "Send a file:line reference or code excerpt to the focused terminal")]
#[command(long_about = None)]
pub struct Cli {
    /// Verbose logging (repeat for more)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deliver a code reference to the terminal
    Send(SendArgs),
    /// Show whether a terminal is available and how it classifies
    Status {
        /// Pane to treat as focused
        #[arg(long, value_name = "ID")]
        pane_id: Option<u64>,

        /// Pane this command runs in; never picked unless requested
        #[arg(long, value_name = "ID", env = "WEZTERM_PANE", hide_env_values = true)]
        caller_pane: Option<u64>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments of `send`
#[derive(clap::Args, Debug, Clone)]
pub struct SendArgs {
    /// File the reference points into
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Line or inclusive range, 1-based (e.g., 10 or 10-12)
    #[arg(short = 'l', long, value_name = "N[-M]")]
    pub lines: LineSpan,

    /// Include the selected lines, not just the reference
    #[arg(short = 'e', long)]
    pub excerpt: bool,

    /// Pane to treat as focused
    #[arg(long, value_name = "ID")]
    pub pane_id: Option<u64>,

    /// Pane this command runs in; never picked unless requested
    #[arg(long, value_name = "ID", env = "WEZTERM_PANE", hide_env_values = true)]
    pub caller_pane: Option<u64>,

    /// Never fall back to a synthetic paste
    #[arg(long)]
    pub no_paste: bool,

    /// Wait before the paste chord, in milliseconds
    #[arg(long, value_name = "MS")]
    pub settle_delay: Option<u64>,

    /// Show desktop notifications
    #[arg(short = 'n', long)]
    pub notify: bool,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "notify",
    "paste.enabled",
    "paste.platform",
    "paste.settle_delay_ms",
    "paste.keystroke_tool",
    "probe.max_depth",
    "probe.max_nodes",
    "classifier.modern_tokens",
    "classifier.classic_tokens",
    "wezterm.binary",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
