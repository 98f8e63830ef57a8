//! Chat refinement turn types.

use serde::{Deserialize, Serialize};

/// The branch a refinement turn took, keyed by the server's `is_complete`.
///
/// The two payloads are mutually exclusive: an in-progress turn carries the
/// next clarifying question, a complete one carries the finished query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The assistant needs more information before the query is ready.
    Question(String),
    /// The dialogue produced a finished, unambiguous search string.
    Completed(String),
}

impl TurnOutcome {
    /// Whether this outcome ends the conversation.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// The refined query, if the turn completed the dialogue.
    pub fn refined_query(&self) -> Option<&str> {
        match self {
            Self::Completed(query) => Some(query),
            Self::Question(_) => None,
        }
    }
}

/// Result of one refinement round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Authoritative id to use on the next call, even when unchanged.
    pub session_id: String,
    pub outcome: TurnOutcome,
}

impl ChatTurn {
    pub fn question(session_id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            outcome: TurnOutcome::Question(question.into()),
        }
    }

    pub fn completed(session_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            outcome: TurnOutcome::Completed(query.into()),
        }
    }
}
