//! Domain error types

use thiserror::Error;

/// A `--lines` value that is not `N` or `N-M` with `1 <= N <= M`
#[derive(Debug, Clone, Error)]
#[error("Invalid line span: \"{input}\". Expected <line> or <start>-<end> with 1 <= start <= end (e.g., 10, 10-12)")]
pub struct LineSpanParseError {
    pub input: String,
}

/// Loading, validating or persisting configuration failed
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Unknown config key '{key}'. Valid keys: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
