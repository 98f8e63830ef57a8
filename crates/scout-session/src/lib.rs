//! scout-session
//!
//! Composition layer: owns the active refinement session and drives the
//! turn loop over the `scout-client` HTTP clients, behind trait seams that
//! tests replace with in-memory mocks.

pub mod backend;
pub mod orchestrator;

pub use backend::{HistoryBackend, RefinementBackend, TelemetrySink, TranscriptionBackend};
pub use orchestrator::{DEFAULT_IDLE_TIMEOUT_MINUTES, SessionOrchestrator};
