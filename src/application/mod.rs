//! Application layer - Use cases and port interfaces
//!
//! Contains the delivery cascade and the trait definitions
//! for external system interactions.

pub mod classify;
pub mod dispatcher;
pub mod paste;
pub mod ports;
pub mod probe;
pub mod report;
pub mod strategy;

// Re-export use cases
pub use classify::{Classifier, TokenSets};
pub use dispatcher::{DeliveryTrace, Dispatcher, Step, SYNTHETIC_PASTE};
pub use paste::PasteFallback;
pub use probe::{ProbeLimits, Probed};
pub use report::{ReportOutcome, ResultReporter};
