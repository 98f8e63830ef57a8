//! History domain models.
//!
//! Read-only projections of completed, persisted search episodes. These are
//! owned entirely by the backend; the client only reads them.

use serde::{Deserialize, Serialize};

/// One row in the search history list view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub search_id: String,
    /// When the search completed (ISO 8601 format)
    pub timestamp: String,
    /// The refined query that was executed
    pub query_text: String,
    /// How many profiles the search returned
    pub final_result_count: u32,
}

/// Pagination parameters for the history list, passed through verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryPage {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl HistoryPage {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }
}

/// Compact profile summary embedded in a ranked result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub name: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

/// How a profile scored against one criterion of the refined query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionMatch {
    pub criterion: String,
    pub matched: bool,
    #[serde(default)]
    pub evidence: Option<String>,
}

/// One ranked match within a completed search episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProfile {
    pub rank: u32,
    pub profile: ProfileSummary,
    pub evaluation_score: f64,
    #[serde(default)]
    pub criteria_matches: Vec<CriterionMatch>,
    #[serde(default)]
    pub overall_assessment: String,
}

/// Full detail of one completed search episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryDetail {
    pub search_id: String,
    #[serde(default)]
    pub is_hub_user: bool,
    #[serde(default)]
    pub requester_has_linkedin: bool,
    pub profiles: Vec<RankedProfile>,
    /// Server-side metadata passed through untouched
    #[serde(default)]
    pub metadata: serde_json::Value,
}
