//! Session domain model.

use crate::error::{Result, ScoutError};
use serde::{Deserialize, Serialize};

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The person refining their search
    User,
    /// The remote refinement assistant
    Assistant,
}

/// One utterance within a clarification dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            text: text.into(),
        }
    }
}

/// Represents one continuous clarification dialogue in the domain layer.
///
/// A session contains:
/// - The server-assigned session id (absent until the first round trip)
/// - The ordered, append-only transcript of turns
/// - The completion flag and, once complete, the refined query
/// - Timestamps for creation and last update (ISO 8601 format)
///
/// Completion is monotonic: once `complete` has been called the session
/// accepts no further turns and cannot revert to the in-progress state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Server-assigned identifier; `None` until the first turn completes
    pub id: Option<String>,
    /// Ordered transcript, insertion order significant
    pub turns: Vec<ConversationTurn>,
    /// Whether the dialogue has produced a finished query
    pub is_complete: bool,
    /// The finished search string, present only once complete
    pub refined_query: Option<String>,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format)
    pub updated_at: String,
}

impl Session {
    /// Creates a fresh session with no server id and an empty transcript.
    pub fn new() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: None,
            turns: Vec::new(),
            is_complete: false,
            refined_query: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Adopts the session id returned by the refinement backend.
    ///
    /// The returned id is authoritative for the next turn even when it is
    /// unchanged, so this always overwrites.
    pub fn adopt_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
        self.touch();
    }

    /// Appends a user utterance to the transcript.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the session is already complete.
    pub fn record_user_turn(&mut self, text: impl Into<String>) -> Result<()> {
        self.record(ConversationTurn::user(text))
    }

    /// Appends an assistant utterance (clarifying question) to the transcript.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the session is already complete.
    pub fn record_assistant_turn(&mut self, text: impl Into<String>) -> Result<()> {
        self.record(ConversationTurn::assistant(text))
    }

    fn record(&mut self, turn: ConversationTurn) -> Result<()> {
        if self.is_complete {
            return Err(ScoutError::validation(
                "This search is already refined. Start a new search to continue.",
            ));
        }
        self.turns.push(turn);
        self.touch();
        Ok(())
    }

    /// Marks the session complete with its refined query.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the session was already complete; the
    /// false-to-true transition happens at most once.
    pub fn complete(&mut self, refined_query: impl Into<String>) -> Result<()> {
        if self.is_complete {
            return Err(ScoutError::validation("Session is already complete."));
        }
        self.is_complete = true;
        self.refined_query = Some(refined_query.into());
        self.touch();
        Ok(())
    }

    /// Number of round trips recorded so far (user turns).
    pub fn user_turn_count(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| t.role == TurnRole::User)
            .count()
    }

    fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_preserves_insertion_order() {
        let mut session = Session::new();
        session.record_user_turn("I need a developer").unwrap();
        session.record_assistant_turn("What stack?").unwrap();
        session.record_user_turn("Python and React").unwrap();

        let roles: Vec<TurnRole> = session.turns.iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![TurnRole::User, TurnRole::Assistant, TurnRole::User]
        );
        assert_eq!(session.user_turn_count(), 2);
    }

    #[test]
    fn completion_is_monotonic() {
        let mut session = Session::new();
        session.record_user_turn("anyone in fintech?").unwrap();
        session.complete("Fintech professionals").unwrap();

        assert!(session.is_complete);
        assert!(session.complete("something else").is_err());
        assert_eq!(
            session.refined_query.as_deref(),
            Some("Fintech professionals")
        );
    }

    #[test]
    fn complete_session_rejects_further_turns() {
        let mut session = Session::new();
        session.complete("done").unwrap();

        let err = session.record_user_turn("one more thing").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn adopt_id_overwrites_unconditionally() {
        let mut session = Session::new();
        assert!(session.id.is_none());
        session.adopt_id("s1");
        session.adopt_id("s1");
        assert_eq!(session.id.as_deref(), Some("s1"));
    }
}
