//! Delivery outcome types

use std::fmt;

use thiserror::Error;

/// Terminal implementation family a target belongs to.
///
/// Assigned once per delivery attempt and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineVariant {
    /// Widget-based terminal driven through a starter/connector pair
    Classic,
    /// Block-based terminal driven through a view/session/controller
    ModernBlock,
    Unknown,
}

impl fmt::Display for EngineVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineVariant::Classic => write!(f, "classic"),
            EngineVariant::ModernBlock => write!(f, "modern-block"),
            EngineVariant::Unknown => write!(f, "unknown"),
        }
    }
}

/// Result of a single strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Delivered,
    NotApplicable,
}

impl Outcome {
    pub fn is_delivered(self) -> bool {
        matches!(self, Outcome::Delivered)
    }
}

/// Why a delivery attempt produced no result
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("No terminal is open or visible. Open a terminal tab and try again.")]
    NoSurface,

    #[error(
        "Could not send to terminal: no terminal session could be confirmed as open, focused, or connected ({attempted} strategies tried for a {variant} terminal)"
    )]
    Exhausted {
        variant: EngineVariant,
        attempted: usize,
    },
}

/// What `deliver` hands back to its caller. Never a panic, never an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendResult {
    Success(String),
    Error(String),
}

impl SendResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SendResult::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SendResult::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            SendResult::Success(message) | SendResult::Error(message) => message,
        }
    }
}

impl From<DeliveryError> for SendResult {
    fn from(err: DeliveryError) -> Self {
        SendResult::Error(err.to_string())
    }
}
