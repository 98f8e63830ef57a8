//! scout-client
//!
//! HTTP clients for the Scout backend: chat refinement, audio transcription,
//! telemetry, and search history. Each client holds a `reqwest::Client` plus
//! an injected [`BackendConfig`]; none of them retries, and every status
//! mapping happens at the response site.

mod detail;

pub mod chat;
pub mod history;
pub mod telemetry;
pub mod transcribe;

pub use chat::ChatClient;
pub use history::HistoryClient;
pub use telemetry::TelemetryClient;
pub use transcribe::TranscribeClient;

use scout_core::config::BackendConfig;
use scout_core::error::{Result, ScoutError};

/// Rejects an absent token before any network call is made.
pub(crate) fn require_token(auth_token: &str) -> Result<()> {
    if auth_token.trim().is_empty() {
        return Err(ScoutError::AuthenticationRequired);
    }
    Ok(())
}

/// Bundles all four clients against one backend origin.
///
/// Convenience for callers that wire the full stack at once; each client is
/// also constructible on its own.
#[derive(Debug, Clone)]
pub struct ScoutClients {
    pub chat: ChatClient,
    pub transcribe: TranscribeClient,
    pub telemetry: TelemetryClient,
    pub history: HistoryClient,
}

impl ScoutClients {
    /// Creates all clients against the given origin.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            chat: ChatClient::new(config.clone()),
            transcribe: TranscribeClient::new(config.clone()),
            telemetry: TelemetryClient::new(config.clone()),
            history: HistoryClient::new(config),
        }
    }

    /// Creates all clients against the environment-configured origin.
    pub fn from_env() -> Self {
        Self::new(BackendConfig::from_env())
    }
}
