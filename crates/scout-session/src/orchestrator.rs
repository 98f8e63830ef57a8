//! Session orchestration.
//!
//! Drives the multi-turn refinement loop: user input (typed or spoken) goes
//! out as one turn, a clarifying question or a finished query comes back,
//! and the server-assigned session id is threaded through every call so one
//! search episode stays correlated across transcription, refinement, and
//! telemetry.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use scout_client::ScoutClients;
use scout_core::chat::TurnOutcome;
use scout_core::error::{Result, ScoutError};
use scout_core::history::{HistoryDetail, HistoryItem, HistoryPage};
use scout_core::session::{ConversationTurn, Session, SessionPhase, UserInput};
use scout_core::telemetry::TelemetryEvent;

use crate::backend::{HistoryBackend, RefinementBackend, TelemetrySink, TranscriptionBackend};

/// Idle conversations older than this are abandoned rather than resumed.
///
/// The remote endpoint does not advertise its own session expiry, so the
/// client refuses to continue a conversation that has sat idle this long
/// and starts a fresh one instead.
pub const DEFAULT_IDLE_TIMEOUT_MINUTES: i64 = 30;

/// The conversation state owned by the orchestrator.
///
/// `epoch` increments every time the conversation is abandoned; an in-flight
/// reply is applied only when the epoch it was issued under still matches,
/// which is what discards a slow response racing an abandon-and-restart.
struct ActiveConversation {
    session: Session,
    phase: SessionPhase,
    epoch: u64,
    last_activity: DateTime<Utc>,
}

impl ActiveConversation {
    fn fresh() -> Self {
        Self {
            session: Session::new(),
            phase: SessionPhase::Idle,
            epoch: 0,
            last_activity: Utc::now(),
        }
    }

    fn abandon(&mut self) {
        self.epoch += 1;
        self.session = Session::new();
        self.phase = SessionPhase::Idle;
        self.last_activity = Utc::now();
    }
}

/// Owns the active session and composes the four backend capabilities.
///
/// # Responsibilities
///
/// - Driving the turn loop against the refinement backend until completion
/// - Routing spoken input through transcription into the same loop
/// - Adopting the server-assigned session id after every successful turn
/// - Discarding stale replies after the user abandons a conversation
/// - Emitting fire-and-forget telemetry tagged with the current session
///
/// # Thread Safety
///
/// The session id is the only shared mutable state; it lives behind a single
/// `RwLock` and is written exclusively by this orchestrator, only after a
/// successful round trip.
pub struct SessionOrchestrator {
    refinement: Arc<dyn RefinementBackend>,
    transcription: Arc<dyn TranscriptionBackend>,
    telemetry: Arc<dyn TelemetrySink>,
    history: Arc<dyn HistoryBackend>,
    auth_token: String,
    idle_timeout: Duration,
    state: RwLock<ActiveConversation>,
}

impl SessionOrchestrator {
    /// Creates an orchestrator over the real HTTP clients.
    pub fn new(clients: ScoutClients, auth_token: impl Into<String>) -> Self {
        Self::with_backends(
            Arc::new(clients.chat),
            Arc::new(clients.transcribe),
            Arc::new(clients.telemetry),
            Arc::new(clients.history),
            auth_token,
        )
    }

    /// Creates an orchestrator over explicit backend implementations.
    pub fn with_backends(
        refinement: Arc<dyn RefinementBackend>,
        transcription: Arc<dyn TranscriptionBackend>,
        telemetry: Arc<dyn TelemetrySink>,
        history: Arc<dyn HistoryBackend>,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            refinement,
            transcription,
            telemetry,
            history,
            auth_token: auth_token.into(),
            idle_timeout: Duration::minutes(DEFAULT_IDLE_TIMEOUT_MINUTES),
            state: RwLock::new(ActiveConversation::fresh()),
        }
    }

    /// Overrides the idle timeout after which a conversation is abandoned.
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Submits one user utterance to the refinement loop.
    ///
    /// Spoken input is transcribed first (emitting a voice-usage telemetry
    /// event on success) and then follows the same path as typed text. On a
    /// successful round trip the returned session id is adopted
    /// unconditionally and the outcome decides the next phase: a question
    /// returns to `AwaitingInput`, completion is terminal.
    ///
    /// # Errors
    ///
    /// - `Validation` when a turn is already in flight or the session is
    ///   complete; the orchestrator is single-flight per session
    /// - Transcription and refinement failures propagate with their
    ///   user-facing message; the phase returns to `AwaitingInput` so a
    ///   retry keeps the conversation context established server-side
    pub async fn submit(&self, input: UserInput) -> Result<TurnOutcome> {
        let (epoch, session_id) = self.reserve_turn().await?;

        let message = match input {
            UserInput::Typed(text) => text,
            UserInput::Spoken { audio } => {
                self.transcribe_clip(audio, epoch, session_id.as_deref())
                    .await?
            }
        };

        if message.trim().is_empty() {
            self.release_turn(epoch).await;
            return Err(ScoutError::validation(
                "We couldn't make out any words. Please try again.",
            ));
        }

        let turn = match self
            .refinement
            .send_turn(&message, &self.auth_token, session_id.as_deref())
            .await
        {
            Ok(turn) => turn,
            Err(err) => {
                self.release_turn(epoch).await;
                return Err(err);
            }
        };

        let mut state = self.state.write().await;
        if state.epoch != epoch {
            tracing::debug!(
                session_id = %turn.session_id,
                "discarding refinement reply for an abandoned conversation"
            );
            return Err(ScoutError::validation(
                "This search was restarted; the reply was discarded.",
            ));
        }

        state.session.adopt_id(&turn.session_id);
        state.session.record_user_turn(&message)?;
        match &turn.outcome {
            TurnOutcome::Question(question) => {
                state.session.record_assistant_turn(question)?;
                state.phase = SessionPhase::AwaitingInput;
            }
            TurnOutcome::Completed(query) => {
                state.session.complete(query)?;
                state.phase = SessionPhase::Complete;
                tracing::info!(session_id = %turn.session_id, "refinement complete");
            }
        }
        state.last_activity = Utc::now();

        Ok(turn.outcome)
    }

    /// Abandons the current conversation and returns to `Idle`.
    ///
    /// Bumps the conversation epoch so any reply still in flight for the old
    /// session is discarded on arrival. A completed session id is never
    /// reused as the starting id of a new conversation.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.abandon();
    }

    /// Current phase of the refinement loop.
    pub async fn phase(&self) -> SessionPhase {
        self.state.read().await.phase
    }

    /// The server-assigned id of the active session, if one exists yet.
    pub async fn session_id(&self) -> Option<String> {
        self.state.read().await.session.id.clone()
    }

    /// The finished query, once the session has completed.
    pub async fn refined_query(&self) -> Option<String> {
        self.state.read().await.session.refined_query.clone()
    }

    /// A copy of the conversation transcript so far.
    pub async fn transcript(&self) -> Vec<ConversationTurn> {
        self.state.read().await.session.turns.clone()
    }

    // ============================================================================
    // Telemetry (fire-and-forget)
    // ============================================================================

    /// Records that a ranked profile was opened.
    pub async fn record_profile_viewed(&self, profile_name: &str, rank: u32) {
        let event = TelemetryEvent::profile_viewed(profile_name, rank);
        self.fire_event(self.tag_with_search_id(event).await);
    }

    /// Records that a profile's LinkedIn link was followed.
    pub async fn record_linkedin_click(&self, profile_name: &str, linkedin_url: &str) {
        let event = TelemetryEvent::linkedin_click(profile_name, linkedin_url);
        self.fire_event(self.tag_with_search_id(event).await);
    }

    /// Records that an outreach draft was generated.
    pub async fn record_ai_draft(&self, profile_name: &str) {
        let event = TelemetryEvent::ai_draft(profile_name);
        self.fire_event(self.tag_with_search_id(event).await);
    }

    // ============================================================================
    // History
    // ============================================================================

    /// Lists past search episodes.
    pub async fn search_history(&self, page: HistoryPage) -> Result<Vec<HistoryItem>> {
        self.history.list_history(&self.auth_token, page).await
    }

    /// Fetches the ranked profiles and rationale of one past episode.
    pub async fn search_history_detail(&self, search_id: &str) -> Result<HistoryDetail> {
        self.history
            .history_detail(&self.auth_token, search_id)
            .await
    }

    // ============================================================================
    // Internals
    // ============================================================================

    /// Claims the single refinement flight for this conversation.
    ///
    /// Also abandons conversations that have sat idle past the timeout; the
    /// fresh conversation then starts with no session id.
    async fn reserve_turn(&self) -> Result<(u64, Option<String>)> {
        let mut state = self.state.write().await;
        match state.phase {
            SessionPhase::Refining => {
                return Err(ScoutError::validation(
                    "A refinement turn is already in flight.",
                ));
            }
            SessionPhase::Complete => {
                return Err(ScoutError::validation(
                    "This search is already refined. Start a new search to continue.",
                ));
            }
            SessionPhase::Idle | SessionPhase::AwaitingInput => {}
        }

        if state.phase == SessionPhase::AwaitingInput
            && Utc::now() - state.last_activity > self.idle_timeout
        {
            tracing::info!("idle conversation expired, starting fresh");
            state.abandon();
        }

        state.phase = SessionPhase::Refining;
        Ok((state.epoch, state.session.id.clone()))
    }

    /// Returns the conversation to `AwaitingInput` after a failed round trip,
    /// unless it was abandoned while the call was in flight.
    async fn release_turn(&self, epoch: u64) {
        let mut state = self.state.write().await;
        if state.epoch == epoch {
            state.phase = SessionPhase::AwaitingInput;
            state.last_activity = Utc::now();
        }
    }

    async fn transcribe_clip(
        &self,
        audio: Vec<u8>,
        epoch: u64,
        session_id: Option<&str>,
    ) -> Result<String> {
        let transcription = match self
            .transcription
            .transcribe(audio, &self.auth_token, session_id)
            .await
        {
            Ok(transcription) => transcription,
            Err(err) => {
                self.release_turn(epoch).await;
                return Err(err);
            }
        };

        let mut event = TelemetryEvent::voice_usage(
            transcription.duration_seconds,
            &transcription.language,
        );
        if let Some(session_id) = session_id {
            event = event.with_search_id(session_id);
        }
        self.fire_event(event);

        Ok(transcription.text)
    }

    async fn tag_with_search_id(&self, event: TelemetryEvent) -> TelemetryEvent {
        match self.session_id().await {
            Some(search_id) => event.with_search_id(search_id),
            None => event,
        }
    }

    /// Detaches a telemetry call from the caller's control flow.
    ///
    /// Rejections go to the diagnostic log; nothing awaits the outcome and
    /// orchestrator state is never touched.
    fn fire_event(&self, event: TelemetryEvent) {
        let sink = Arc::clone(&self.telemetry);
        let token = self.auth_token.clone();
        tokio::spawn(async move {
            if let Err(err) = sink.log_event(&event, Some(&token)).await {
                tracing::warn!("telemetry event dropped: {err}");
            }
        });
    }
}
