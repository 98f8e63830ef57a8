//! Session domain module.
//!
//! A session is one continuous clarification dialogue with the refinement
//! backend: the server assigns its id on the first turn, every round trip
//! appends a user/assistant turn pair, and completion is terminal.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`) and its turn types
//! - `phase`: Orchestrator phase tracking (`SessionPhase`)
//! - `user_input`: User input types (`UserInput`)

mod model;
mod phase;
mod user_input;

// Re-export public API
pub use model::{ConversationTurn, Session, TurnRole};
pub use phase::SessionPhase;
pub use user_input::UserInput;
