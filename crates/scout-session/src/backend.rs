//! Backend capability traits.
//!
//! The orchestrator talks to the network through these seams so tests can
//! substitute in-memory mocks. The `scout-client` types implement them by
//! delegating to their HTTP methods.

use async_trait::async_trait;

use scout_client::{ChatClient, HistoryClient, TelemetryClient, TranscribeClient};
use scout_core::chat::ChatTurn;
use scout_core::error::Result;
use scout_core::history::{HistoryDetail, HistoryItem, HistoryPage};
use scout_core::telemetry::{TelemetryEvent, TelemetryReceipt};
use scout_core::transcript::Transcription;

/// One refinement round trip: utterance in, question or finished query out.
#[async_trait]
pub trait RefinementBackend: Send + Sync {
    async fn send_turn(
        &self,
        message: &str,
        auth_token: &str,
        session_id: Option<&str>,
    ) -> Result<ChatTurn>;
}

/// Converts a captured audio clip into text.
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        auth_token: &str,
        session_id: Option<&str>,
    ) -> Result<Transcription>;
}

/// Best-effort usage event sink.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    async fn log_event(
        &self,
        event: &TelemetryEvent,
        auth_token: Option<&str>,
    ) -> Result<TelemetryReceipt>;
}

/// Read-only access to completed search episodes.
#[async_trait]
pub trait HistoryBackend: Send + Sync {
    async fn list_history(&self, auth_token: &str, page: HistoryPage) -> Result<Vec<HistoryItem>>;

    async fn history_detail(&self, auth_token: &str, search_id: &str) -> Result<HistoryDetail>;
}

#[async_trait]
impl RefinementBackend for ChatClient {
    async fn send_turn(
        &self,
        message: &str,
        auth_token: &str,
        session_id: Option<&str>,
    ) -> Result<ChatTurn> {
        ChatClient::send_turn(self, message, auth_token, session_id).await
    }
}

#[async_trait]
impl TranscriptionBackend for TranscribeClient {
    async fn transcribe(
        &self,
        audio: Vec<u8>,
        auth_token: &str,
        session_id: Option<&str>,
    ) -> Result<Transcription> {
        TranscribeClient::transcribe(self, audio, auth_token, session_id).await
    }
}

#[async_trait]
impl TelemetrySink for TelemetryClient {
    async fn log_event(
        &self,
        event: &TelemetryEvent,
        auth_token: Option<&str>,
    ) -> Result<TelemetryReceipt> {
        TelemetryClient::log_event(self, event, auth_token).await
    }
}

#[async_trait]
impl HistoryBackend for HistoryClient {
    async fn list_history(&self, auth_token: &str, page: HistoryPage) -> Result<Vec<HistoryItem>> {
        HistoryClient::list_history(self, auth_token, page).await
    }

    async fn history_detail(&self, auth_token: &str, search_id: &str) -> Result<HistoryDetail> {
        HistoryClient::history_detail(self, auth_token, search_id).await
    }
}
