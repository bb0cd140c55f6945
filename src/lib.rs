//! term-courier - deliver code references to a terminal session
//!
//! Given an opaque terminal target owned by some host, the dispatcher works
//! out which terminal engine it is, tries an ordered cascade of delivery
//! strategies through capability probes, falls back to a synthetic paste on
//! the sanctioned platform, and reports the outcome.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Payloads, delivery outcomes, platform and configuration
//! - **Host**: The [`host::HostObject`] model the prober works against
//! - **Application**: Classifier, prober, strategies, dispatcher, reporter and ports
//! - **Infrastructure**: Adapters (arboard, enigo, notify-rust, XDG config, WezTerm)
//! - **CLI**: Command-line interface, argument parsing, and logging setup

pub mod application;
pub mod cli;
pub mod domain;
pub mod host;
pub mod infrastructure;
