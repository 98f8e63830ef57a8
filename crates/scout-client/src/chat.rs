//! Chat refinement client.
//!
//! One round trip per call: the user's utterance goes up, and either a
//! clarifying question or the finished query comes back. This is the sole
//! transition function of the refinement loop; the orchestrator in
//! `scout-session` drives it until `is_complete`.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use scout_core::chat::ChatTurn;
use scout_core::config::BackendConfig;
use scout_core::error::{Result, ScoutError};

use crate::detail::normalize_detail;
use crate::require_token;

const GENERIC_CHAT_FAILURE: &str = "Could not reach the search assistant. Please try again.";

/// Client for the `/chat` refinement endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    config: BackendConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    /// Absence signals "start a new session" to the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<&'a str>,
}

#[derive(Deserialize)]
struct ChatResponse {
    session_id: String,
    is_complete: bool,
    #[serde(default)]
    next_question: Option<String>,
    #[serde(default)]
    query: Option<String>,
}

impl ChatClient {
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

    /// Sends one refinement turn.
    ///
    /// Pass the `session_id` returned by the previous turn to continue a
    /// conversation; pass `None` to start a new one. No bound is placed on
    /// the number of turns here; the remote endpoint owns that policy.
    ///
    /// # Errors
    ///
    /// - `AuthenticationRequired` before any I/O when the token is empty
    /// - `AuthenticationFailed` on HTTP 401
    /// - `RemoteRejected` on other non-2xx with a parseable detail
    /// - `RemoteUnavailable` on transport failure or an unparsable body
    pub async fn send_turn(
        &self,
        message: &str,
        auth_token: &str,
        session_id: Option<&str>,
    ) -> Result<ChatTurn> {
        require_token(auth_token)?;

        tracing::debug!(?session_id, "sending refinement turn");

        let request = ChatRequest {
            message,
            session_id,
        };

        let response = self
            .client
            .post(self.config.endpoint("/chat"))
            .bearer_auth(auth_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_chat_error(status, &body));
        }

        let parsed: ChatResponse = response.json().await.map_err(|err| {
            ScoutError::remote_unavailable(format!("Malformed chat response: {err}"))
        })?;

        into_turn(parsed)
    }
}

fn into_turn(response: ChatResponse) -> Result<ChatTurn> {
    if response.is_complete {
        let query = response.query.ok_or_else(|| {
            ScoutError::remote_unavailable("Chat response marked complete but carried no query")
        })?;
        Ok(ChatTurn::completed(response.session_id, query))
    } else {
        let question = response.next_question.ok_or_else(|| {
            ScoutError::remote_unavailable("Chat response carried neither question nor query")
        })?;
        Ok(ChatTurn::question(response.session_id, question))
    }
}

fn map_chat_error(status: StatusCode, body: &str) -> ScoutError {
    if status == StatusCode::UNAUTHORIZED {
        return ScoutError::auth_failed("Please sign in again.");
    }
    match normalize_detail(body) {
        Some(message) => ScoutError::remote_rejected(status.as_u16(), message),
        None => ScoutError::remote_unavailable(GENERIC_CHAT_FAILURE),
    }
}
