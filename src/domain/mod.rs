//! Domain layer - Core value objects
//!
//! Contains payloads, delivery outcomes, platform identification,
//! configuration and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod delivery;
pub mod error;
pub mod payload;
pub mod platform;

// Re-export common types
pub use config::AppConfig;
pub use delivery::{DeliveryError, EngineVariant, Outcome, SendResult};
pub use error::*;
pub use payload::{LineSpan, Payload, Selection};
pub use platform::{PasteShortcut, Platform};
