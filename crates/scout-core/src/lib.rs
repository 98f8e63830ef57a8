//! scout-core
//!
//! Domain models, error taxonomy, and configuration for the Scout client
//! stack. This crate knows nothing about HTTP; the wire-level clients live
//! in `scout-client` and the session orchestration in `scout-session`.

pub mod chat;
pub mod config;
pub mod error;
pub mod history;
pub mod session;
pub mod telemetry;
pub mod transcript;

// Re-export common error type
pub use error::{Result, ScoutError};
