//! Audio transcription client.
//!
//! Ships a captured clip to the backend as an opaque blob; the server infers
//! and validates the format. No retries here: whether to re-record is the
//! caller's decision.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use scout_core::config::BackendConfig;
use scout_core::error::{Result, ScoutError};
use scout_core::transcript::Transcription;

use crate::detail::normalize_detail;
use crate::require_token;

const RECORDING_TOO_LONG: &str = "Recording too long. Please keep it under 2 minutes.";
const UNSUPPORTED_FORMAT: &str = "Unsupported audio format. Please try again.";
const GENERIC_TRANSCRIBE_FAILURE: &str = "Could not transcribe audio. Please try again.";

/// Client for the `/transcribe` endpoint.
#[derive(Debug, Clone)]
pub struct TranscribeClient {
    client: Client,
    config: BackendConfig,
}

#[derive(Deserialize)]
struct TranscribeResponse {
    #[serde(default)]
    text: String,
    #[serde(default)]
    duration_seconds: Option<f64>,
    #[serde(default = "default_language")]
    language: String,
}

fn default_language() -> String {
    "en".to_string()
}

impl TranscribeClient {
    /// Creates a client against the given backend origin.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Creates a client against the environment-configured origin.
    pub fn from_env() -> Self {
        Self::new(BackendConfig::from_env())
    }

    /// Transcribes one audio clip.
    ///
    /// The clip is sent as a multipart `audio` part; `session_id`, when
    /// present, tags the transcription to the active refinement session.
    ///
    /// # Errors
    ///
    /// - `AuthenticationRequired` before any I/O when the token is empty
    /// - `AuthenticationFailed` on HTTP 401
    /// - `Validation` on 400 responses about clip size or format
    /// - `RemoteRejected` on other 400s with a server-provided detail
    /// - `RemoteUnavailable` on 5xx, transport failure, or unparsable bodies
    pub async fn transcribe(
        &self,
        audio: Vec<u8>,
        auth_token: &str,
        session_id: Option<&str>,
    ) -> Result<Transcription> {
        require_token(auth_token)?;

        tracing::debug!(bytes = audio.len(), ?session_id, "uploading audio clip");

        let audio_part = Part::bytes(audio)
            .file_name("clip.webm")
            .mime_str("application/octet-stream")
            .map_err(|err| ScoutError::internal(format!("audio part: {err}")))?;

        let mut form = Form::new().part("audio", audio_part);
        if let Some(session_id) = session_id {
            form = form.text("session_id", session_id.to_string());
        }

        let response = self
            .client
            .post(self.config.endpoint("/transcribe"))
            .bearer_auth(auth_token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_transcribe_error(status, &body));
        }

        let parsed: TranscribeResponse = response.json().await.map_err(|err| {
            ScoutError::remote_unavailable(format!("Malformed transcription response: {err}"))
        })?;

        Ok(Transcription {
            text: parsed.text,
            duration_seconds: parsed.duration_seconds,
            language: parsed.language,
        })
    }
}

fn map_transcribe_error(status: StatusCode, body: &str) -> ScoutError {
    if status == StatusCode::UNAUTHORIZED {
        return ScoutError::auth_failed("Please sign in again.");
    }

    let detail = normalize_detail(body);

    if status == StatusCode::BAD_REQUEST {
        if let Some(message) = detail {
            let lower = message.to_lowercase();
            if lower.contains("too large") || lower.contains("too long") || lower.contains("size") {
                return ScoutError::validation(RECORDING_TOO_LONG);
            }
            if lower.contains("format") || lower.contains("unsupported") {
                return ScoutError::validation(UNSUPPORTED_FORMAT);
            }
            return ScoutError::remote_rejected(status.as_u16(), message);
        }
        return ScoutError::remote_unavailable(GENERIC_TRANSCRIBE_FAILURE);
    }

    // 5xx and anything else degrade to the generic retry condition.
    ScoutError::remote_unavailable(GENERIC_TRANSCRIBE_FAILURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TranscribeClient {
        TranscribeClient::new(BackendConfig::new(server.uri()))
    }

    #[tokio::test]
    async fn successful_clip_yields_text_and_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transcribe"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "text": "I need a fintech founder in Berlin",
                "duration_seconds": 4.2,
                "language": "en"
            })))
            .mount(&server)
            .await;

        let transcription = client_for(&server)
            .transcribe(vec![1, 2, 3], "tok", Some("s1"))
            .await
            .unwrap();

        assert_eq!(transcription.text, "I need a fintech founder in Berlin");
        assert_eq!(transcription.duration_seconds, Some(4.2));
        assert!(!transcription.is_empty());
    }

    #[tokio::test]
    async fn missing_token_makes_no_network_call() {
        let server = MockServer::start().await;

        let err = client_for(&server)
            .transcribe(vec![1], "  ", None)
            .await
            .unwrap_err();

        assert!(matches!(err, ScoutError::AuthenticationRequired));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn oversized_clip_maps_to_recording_too_long() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transcribe"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "detail": "Audio file too large for transcription"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .transcribe(vec![0; 16], "tok", None)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Recording too long. Please keep it under 2 minutes."
        );
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn unknown_format_maps_to_unsupported_format() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transcribe"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "detail": "Unsupported media format"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .transcribe(vec![0; 16], "tok", None)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Unsupported audio format. Please try again.");
    }

    #[tokio::test]
    async fn other_bad_requests_pass_the_server_detail_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transcribe"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "detail": "No speech detected"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .transcribe(vec![0; 16], "tok", None)
            .await
            .unwrap_err();

        match err {
            ScoutError::RemoteRejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "No speech detected");
            }
            other => panic!("expected RemoteRejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn server_errors_degrade_to_generic_retry_condition() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transcribe"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .transcribe(vec![0; 16], "tok", None)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Backend unavailable: Could not transcribe audio. Please try again."
        );
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/transcribe"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .transcribe(vec![0; 16], "stale", None)
            .await
            .unwrap_err();

        assert!(matches!(err, ScoutError::AuthenticationFailed(_)));
    }
}
