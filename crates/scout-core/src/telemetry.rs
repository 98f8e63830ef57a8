//! Telemetry event models.
//!
//! Events are best-effort usage signals fired alongside the search flow.
//! Payload field names deliberately match the fields the search endpoint
//! emits (`rank`, `linkedin_url`, `duration_seconds`, ...) so events can be
//! joined back to search results downstream.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// The fixed set of usage events the backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryEventType {
    /// A search utterance arrived through the voice path
    VoiceUsage,
    /// A ranked profile was opened in the results view
    ProfileViewed,
    /// The user followed a profile's LinkedIn link
    LinkedinClick,
    /// An outreach draft was generated for a profile
    AiDraft,
}

/// One usage event, optionally correlated to a completed search episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    pub event_type: TelemetryEventType,
    /// Correlates the event to a session that reached completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_id: Option<String>,
    /// Free-form payload whose shape depends on `event_type`
    pub event_data: serde_json::Value,
}

impl TelemetryEvent {
    pub fn new(event_type: TelemetryEventType, event_data: serde_json::Value) -> Self {
        Self {
            event_type,
            search_id: None,
            event_data,
        }
    }

    /// Attaches the search id the event belongs to.
    pub fn with_search_id(mut self, search_id: impl Into<String>) -> Self {
        self.search_id = Some(search_id.into());
        self
    }

    /// Voice intake happened for the active search.
    pub fn voice_usage(duration_seconds: Option<f64>, language: &str) -> Self {
        Self::new(
            TelemetryEventType::VoiceUsage,
            json!({
                "duration_seconds": duration_seconds,
                "language": language,
            }),
        )
    }

    /// A ranked profile was opened.
    pub fn profile_viewed(profile_name: &str, rank: u32) -> Self {
        Self::new(
            TelemetryEventType::ProfileViewed,
            json!({
                "profile_name": profile_name,
                "rank": rank,
            }),
        )
    }

    /// A profile's LinkedIn link was followed.
    pub fn linkedin_click(profile_name: &str, linkedin_url: &str) -> Self {
        Self::new(
            TelemetryEventType::LinkedinClick,
            json!({
                "profile_name": profile_name,
                "linkedin_url": linkedin_url,
            }),
        )
    }

    /// An outreach draft was generated.
    pub fn ai_draft(profile_name: &str) -> Self {
        Self::new(
            TelemetryEventType::AiDraft,
            json!({
                "profile_name": profile_name,
            }),
        )
    }
}

/// Acknowledgement returned by the telemetry endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryReceipt {
    pub success: bool,
    pub event_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_serializes_snake_case() {
        let value = serde_json::to_value(TelemetryEventType::LinkedinClick).unwrap();
        assert_eq!(value, serde_json::json!("linkedin_click"));
        let value = serde_json::to_value(TelemetryEventType::VoiceUsage).unwrap();
        assert_eq!(value, serde_json::json!("voice_usage"));
    }

    #[test]
    fn search_id_is_omitted_when_absent() {
        let event = TelemetryEvent::ai_draft("Asha Rao");
        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("search_id").is_none());

        let tagged = event.with_search_id("s42");
        let value = serde_json::to_value(&tagged).unwrap();
        assert_eq!(value["search_id"], "s42");
    }
}
