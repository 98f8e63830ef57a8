//! Search history client.
//!
//! Read-only projections of completed search episodes. Every call is a
//! fresh fetch; nothing is cached locally.

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use scout_core::config::BackendConfig;
use scout_core::error::{Result, ScoutError};
use scout_core::history::{HistoryDetail, HistoryItem, HistoryPage, RankedProfile};

use crate::detail::normalize_detail;
use crate::require_token;

const GENERIC_HISTORY_FAILURE: &str = "Failed to fetch search history. Please try again.";

/// Client for the `/api/v1/history` endpoints.
#[derive(Debug, Clone)]
pub struct HistoryClient {
    client: Client,
    config: BackendConfig,
}

#[derive(Deserialize)]
struct HistoryDetailResponse {
    #[allow(dead_code)]
    #[serde(default)]
    success: bool,
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    is_hub_user: bool,
    #[serde(default)]
    requester_has_linkedin: bool,
    #[serde(default)]
    profiles: Vec<RankedProfile>,
    #[serde(default)]
    metadata: serde_json::Value,
}

impl HistoryClient {
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

    /// Lists past search episodes, server-defined ordering.
    ///
    /// Pagination parameters are passed through verbatim when present and
    /// omitted otherwise.
    ///
    /// # Errors
    ///
    /// - `AuthenticationRequired` before any I/O when the token is empty
    /// - `AuthenticationFailed` on HTTP 401
    /// - `RemoteRejected`/`RemoteUnavailable` on other failures
    pub async fn list_history(
        &self,
        auth_token: &str,
        page: HistoryPage,
    ) -> Result<Vec<HistoryItem>> {
        require_token(auth_token)?;

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(limit) = page.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = page.offset {
            params.push(("offset", offset.to_string()));
        }

        let response = self
            .client
            .get(self.config.endpoint("/api/v1/history"))
            .query(&params)
            .bearer_auth(auth_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_history_error(status, &body));
        }

        response.json::<Vec<HistoryItem>>().await.map_err(|err| {
            ScoutError::remote_unavailable(format!("Malformed history response: {err}"))
        })
    }

    /// Fetches the full detail of one completed search episode.
    ///
    /// # Errors
    ///
    /// As [`list_history`](Self::list_history), plus `NotFound` on HTTP 404:
    /// the detail lookup is the only endpoint where 404 is distinguished
    /// from a generic failure.
    pub async fn history_detail(
        &self,
        auth_token: &str,
        search_id: &str,
    ) -> Result<HistoryDetail> {
        require_token(auth_token)?;

        let response = self
            .client
            .get(
                self.config
                    .endpoint(&format!("/api/v1/history/{search_id}")),
            )
            .bearer_auth(auth_token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ScoutError::not_found("History item", search_id));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_history_error(status, &body));
        }

        let parsed: HistoryDetailResponse = response.json().await.map_err(|err| {
            ScoutError::remote_unavailable(format!("Malformed history detail: {err}"))
        })?;

        Ok(HistoryDetail {
            search_id: parsed.response.unwrap_or_else(|| search_id.to_string()),
            is_hub_user: parsed.is_hub_user,
            requester_has_linkedin: parsed.requester_has_linkedin,
            profiles: parsed.profiles,
            metadata: parsed.metadata,
        })
    }
}

fn map_history_error(status: StatusCode, body: &str) -> ScoutError {
    if status == StatusCode::UNAUTHORIZED {
        return ScoutError::auth_failed("Please sign in again.");
    }
    match normalize_detail(body) {
        Some(message) => ScoutError::remote_rejected(status.as_u16(), message),
        None => ScoutError::remote_unavailable(GENERIC_HISTORY_FAILURE),
    }
}
