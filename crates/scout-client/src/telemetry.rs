//! Telemetry client.
//!
//! Fire-and-forget usage events. Failures map to `TelemetryLost` so call
//! sites can discard them; the orchestrator wraps calls in a detached task
//! and routes rejections to the diagnostic log, never to the user.

use reqwest::{Client, StatusCode};
use serde::Serialize;

use scout_core::config::BackendConfig;
use scout_core::error::{Result, ScoutError};
use scout_core::telemetry::{TelemetryEvent, TelemetryEventType, TelemetryReceipt};

use crate::detail::normalize_detail;

/// Client for the `/api/telemetry/event` endpoint.
#[derive(Debug, Clone)]
pub struct TelemetryClient {
    client: Client,
    config: BackendConfig,
}

#[derive(Serialize)]
struct TelemetryRequest<'a> {
    event_type: TelemetryEventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_id: Option<&'a str>,
    event_data: &'a serde_json::Value,
}

impl TelemetryClient {
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

    /// Logs one usage event.
    ///
    /// The token is optional; anonymous events go out without an
    /// authorization header. A 401 maps to `AuthenticationFailed` like every
    /// other endpoint; all remaining failures, transport included, map to
    /// `TelemetryLost`: loss is acceptable and carries no retry obligation.
    pub async fn log_event(
        &self,
        event: &TelemetryEvent,
        auth_token: Option<&str>,
    ) -> Result<TelemetryReceipt> {
        let request = TelemetryRequest {
            event_type: event.event_type,
            search_id: event.search_id.as_deref(),
            event_data: &event.event_data,
        };

        let mut builder = self
            .client
            .post(self.config.endpoint("/api/telemetry/event"))
            .json(&request);
        if let Some(token) = auth_token.filter(|t| !t.trim().is_empty()) {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| ScoutError::telemetry_lost(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_telemetry_error(status, &body));
        }

        response
            .json::<TelemetryReceipt>()
            .await
            .map_err(|err| ScoutError::telemetry_lost(format!("malformed receipt: {err}")))
    }
}

fn map_telemetry_error(status: StatusCode, body: &str) -> ScoutError {
    if status == StatusCode::UNAUTHORIZED {
        return ScoutError::auth_failed("Please sign in again.");
    }
    let message = normalize_detail(body)
        .unwrap_or_else(|| format!("telemetry endpoint returned {}", status.as_u16()));
    ScoutError::telemetry_lost(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TelemetryClient {
        TelemetryClient::new(BackendConfig::new(server.uri()))
    }

    #[tokio::test]
    async fn event_is_acknowledged_with_an_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/telemetry/event"))
            .and(body_json(json!({
                "event_type": "profile_viewed",
                "search_id": "s9",
                "event_data": {"profile_name": "Asha Rao", "rank": 1}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "event_id": "evt-1"
            })))
            .mount(&server)
            .await;

        let event = TelemetryEvent::profile_viewed("Asha Rao", 1).with_search_id("s9");
        let receipt = client_for(&server)
            .log_event(&event, Some("tok"))
            .await
            .unwrap();

        assert!(receipt.success);
        assert_eq!(receipt.event_id, "evt-1");
    }

    #[tokio::test]
    async fn anonymous_events_omit_the_authorization_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/telemetry/event"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "event_id": "evt-2"
            })))
            .mount(&server)
            .await;

        let event = TelemetryEvent::voice_usage(Some(3.5), "en");
        client_for(&server).log_event(&event, None).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn authorized_events_carry_the_bearer_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/telemetry/event"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "event_id": "evt-3"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let event = TelemetryEvent::ai_draft("Asha Rao");
        client_for(&server)
            .log_event(&event, Some("tok"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn failures_map_to_telemetry_lost() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/telemetry/event"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let event = TelemetryEvent::linkedin_click("Asha Rao", "https://linkedin.com/in/asha");
        let err = client_for(&server)
            .log_event(&event, Some("tok"))
            .await
            .unwrap_err();

        assert!(err.is_telemetry_lost());
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication_failed_not_telemetry_lost() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/telemetry/event"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let event = TelemetryEvent::profile_viewed("Asha Rao", 1);
        let err = client_for(&server)
            .log_event(&event, Some("stale"))
            .await
            .unwrap_err();

        assert!(matches!(err, ScoutError::AuthenticationFailed(_)));
        assert!(!err.is_telemetry_lost());
    }
}
