//! CLI presenter for output formatting

use std::io::IsTerminal;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::delivery::{EngineVariant, SendResult};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message. Skipped when stderr is not a terminal.
    pub fn start_spinner(&mut self, message: &str) {
        if !std::io::stderr().is_terminal() {
            return;
        }
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Final line for a delivery
    pub fn send_result(&self, result: &SendResult) {
        match result {
            SendResult::Success(message) => self.success(message),
            SendResult::Error(message) => self.error(message),
        }
    }

    /// Print the `status` report
    pub fn terminal_status(&self, available: bool, variant: EngineVariant, panes: usize) {
        let state = if available {
            "available".green()
        } else {
            "not available".red()
        };
        println!("{}: {}", "terminal".cyan(), state);
        println!("{}: {}", "engine".cyan(), variant);
        println!("{}: {}", "panes".cyan(), panes);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
