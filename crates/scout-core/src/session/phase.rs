//! Orchestrator phase tracking.

use serde::{Deserialize, Serialize};

/// Where the refinement loop currently stands for the active session.
///
/// Transitions:
/// `Idle` -> `AwaitingInput` -> `Refining` -> (`AwaitingInput` | `Complete`)
///
/// A failed round trip returns to `AwaitingInput`, never to `Idle`, so the
/// user can retry without losing conversation context already established
/// server-side. `Complete` is terminal for the conversation; starting a new
/// search resets to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No session id held, nothing submitted yet
    Idle,
    /// Waiting for the next user utterance, typed or transcribed
    AwaitingInput,
    /// A refinement round trip is in flight; input submission is rejected
    Refining,
    /// The dialogue yielded a refined query; no further turns accepted
    Complete,
}
