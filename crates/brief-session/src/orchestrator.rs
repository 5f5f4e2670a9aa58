//! Session orchestrator: the state machine coordinating conversation,
//! documents, and the remote brief client.
//!
//! Sequences user turns, issues brief-generation calls, merges settlements
//! back into the conversation log, and owns the reset/retry-safe lifecycle.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Local;
use tracing::{debug, info, warn};
use uuid::Uuid;

use brief_client::{BriefService, ClientError};
use brief_core::types::{BriefPayload, BriefRunRequest, ConversationTurn, DocumentReference};

use crate::conversation::ConversationLog;
use crate::documents::DocumentRegistry;
use crate::error::SessionError;

/// Acknowledgment appended when the backend has no follow-up questions.
pub const COMPLETION_MESSAGE: &str =
    "Your project brief is ready. Review the preview and send another message if anything needs adjusting.";

/// Preamble of the enumerated request for more detail.
pub const FOLLOW_UP_PREAMBLE: &str = "I still need a bit more detail:";

/// Aggregate state owned by the orchestrator.
///
/// `generation` guards against stale settlements: reset bumps it, and any
/// call that captured an older value discards its result on arrival.
#[derive(Debug)]
struct SessionState {
    conversation: ConversationLog,
    documents: DocumentRegistry,
    thread_id: Option<String>,
    pending: bool,
    last_error: Option<ClientError>,
    last_result: Option<BriefPayload>,
    generation: u64,
    started_at: i64,
}

impl SessionState {
    fn new() -> Self {
        Self {
            conversation: ConversationLog::new(),
            documents: DocumentRegistry::new(),
            thread_id: None,
            pending: false,
            last_error: None,
            last_result: None,
            generation: 0,
            started_at: Local::now().timestamp(),
        }
    }
}

/// Consistent read-only view of the session for presentation adapters.
#[derive(Clone, Debug)]
pub struct SessionSnapshot {
    pub conversation: Vec<ConversationTurn>,
    pub documents: Vec<DocumentReference>,
    pub thread_id: Option<String>,
    pub pending: bool,
    pub last_error: Option<ClientError>,
    pub last_result: Option<BriefPayload>,
    pub started_at: i64,
}

/// Coordinates one intake session against a brief-generation backend.
///
/// Owned, single-instance state with an explicit lifecycle; multiple
/// independent orchestrators (and therefore sessions) can coexist.
pub struct SessionOrchestrator {
    client: Arc<dyn BriefService>,
    state: Mutex<SessionState>,
}

impl SessionOrchestrator {
    /// Create an orchestrator with an empty session.
    pub fn new(client: Arc<dyn BriefService>) -> Self {
        Self {
            client,
            state: Mutex::new(SessionState::new()),
        }
    }

    /// Append a user turn and run brief generation over the full context.
    ///
    /// At most one run may be in flight: a submission while another is
    /// pending is refused with [`SessionError::Busy`] before the turn is
    /// appended, so a refused submission leaves no trace.
    ///
    /// On success the server's `thread_id` is adopted (overwriting any
    /// prior value) and exactly one assistant turn is synthesized from the
    /// payload's follow-up questions. On failure the error becomes the
    /// session's last error and no turn is appended; the session returns
    /// to idle and the user may immediately resend.
    pub async fn send_turn(
        &self,
        content: impl Into<String>,
    ) -> Result<BriefPayload, SessionError> {
        self.submit(content.into(), None).await
    }

    /// Like [`send_turn`](Self::send_turn), with an extra instruction
    /// carried in the request's `prompt` field.
    pub async fn send_turn_with_prompt(
        &self,
        content: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Result<BriefPayload, SessionError> {
        self.submit(content.into(), Some(prompt.into())).await
    }

    async fn submit(
        &self,
        content: String,
        prompt: Option<String>,
    ) -> Result<BriefPayload, SessionError> {
        let (request, generation) = {
            let mut state = self.lock_state()?;
            if state.pending {
                return Err(SessionError::Busy);
            }
            state.conversation.append(ConversationTurn::user(content));
            state.pending = true;
            let request = BriefRunRequest {
                conversation: state.conversation.turns().to_vec(),
                documents: state.documents.references().to_vec(),
                prompt,
                thread_id: state.thread_id.clone(),
            };
            (request, state.generation)
        };

        // Suspension point: the lock is not held across the call.
        let outcome = self.client.run_brief(&request).await;

        let mut state = self.lock_state()?;
        if state.generation != generation {
            debug!("discarding brief settlement for a superseded session");
            return Err(SessionError::Superseded);
        }
        state.pending = false;
        match outcome {
            Ok(payload) => {
                // The server is the authority on thread identity.
                state.thread_id = Some(payload.thread_id.clone());
                let reply = synthesize_assistant_reply(&payload.follow_up_questions);
                state.conversation.append(ConversationTurn::assistant(reply));
                state.last_error = None;
                state.last_result = Some(payload.clone());
                info!(
                    thread_id = %payload.thread_id,
                    follow_ups = payload.follow_up_questions.len(),
                    "brief run settled"
                );
                Ok(payload)
            }
            Err(err) => {
                warn!(error = %err, "brief run failed");
                state.last_error = Some(err.clone());
                Err(err.into())
            }
        }
    }

    /// Register a client-side placeholder attachment with a generated id.
    pub fn attach_document(
        &self,
        name: impl Into<String>,
    ) -> Result<DocumentReference, SessionError> {
        let reference = DocumentReference::new(Uuid::new_v4().to_string(), name);
        let mut state = self.lock_state()?;
        state.documents.add(reference.clone());
        Ok(reference)
    }

    /// Upload a supporting document and register the server's reference.
    ///
    /// Uploads run concurrently with each other and with a pending brief
    /// run; they touch the registry only at settlement. A failed upload
    /// propagates to the caller and leaves the registry and the session's
    /// last error untouched.
    pub async fn upload_document(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<DocumentReference, SessionError> {
        let generation = self.lock_state()?.generation;

        let reference = self
            .client
            .upload_document(file_name, content)
            .await
            .map_err(SessionError::Client)?;

        let mut state = self.lock_state()?;
        if state.generation != generation {
            debug!("discarding upload settlement for a superseded session");
            return Err(SessionError::Superseded);
        }
        state.documents.add(reference.clone());
        Ok(reference)
    }

    /// Clear the session back to its initial state.
    ///
    /// Bumps the generation counter so any in-flight settlement is
    /// discarded on arrival instead of resurrecting the old session.
    pub fn reset(&self) -> Result<(), SessionError> {
        let mut state = self.lock_state()?;
        state.generation += 1;
        state.conversation.clear();
        state.documents.clear();
        state.thread_id = None;
        state.pending = false;
        state.last_error = None;
        state.last_result = None;
        state.started_at = Local::now().timestamp();
        info!(generation = state.generation, "session reset");
        Ok(())
    }

    // -- Read surface for presentation adapters --

    pub fn conversation(&self) -> Vec<ConversationTurn> {
        match self.state.lock() {
            Ok(state) => state.conversation.turns().to_vec(),
            Err(_) => vec![],
        }
    }

    pub fn documents(&self) -> Vec<DocumentReference> {
        match self.state.lock() {
            Ok(state) => state.documents.references().to_vec(),
            Err(_) => vec![],
        }
    }

    pub fn thread_id(&self) -> Option<String> {
        self.state.lock().ok().and_then(|s| s.thread_id.clone())
    }

    /// Whether a brief run is in flight. The UI-facing busy flag.
    pub fn is_pending(&self) -> bool {
        self.state.lock().map(|s| s.pending).unwrap_or(false)
    }

    pub fn last_error(&self) -> Option<ClientError> {
        self.state.lock().ok().and_then(|s| s.last_error.clone())
    }

    pub fn last_result(&self) -> Option<BriefPayload> {
        self.state.lock().ok().and_then(|s| s.last_result.clone())
    }

    /// One consistent picture of the session, cloned under a single lock.
    pub fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        let state = self.lock_state()?;
        Ok(SessionSnapshot {
            conversation: state.conversation.turns().to_vec(),
            documents: state.documents.references().to_vec(),
            thread_id: state.thread_id.clone(),
            pending: state.pending,
            last_error: state.last_error.clone(),
            last_result: state.last_result.clone(),
            started_at: state.started_at,
        })
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, SessionState>, SessionError> {
        self.state
            .lock()
            .map_err(|e| SessionError::State(format!("session lock poisoned: {}", e)))
    }
}

/// Build the single assistant turn appended after a successful run.
///
/// Deterministic and unconditional: the backend's `assistant_message`
/// field, when present, is carried on the payload but never echoed here.
fn synthesize_assistant_reply(questions: &[String]) -> String {
    if questions.is_empty() {
        return COMPLETION_MESSAGE.to_string();
    }
    let mut reply = String::from(FOLLOW_UP_PREAMBLE);
    for (index, question) in questions.iter().enumerate() {
        reply.push('\n');
        reply.push_str(&(index + 1).to_string());
        reply.push_str(". ");
        reply.push_str(question);
    }
    reply
}

// =============================================================================
// Tests
// =============================================================================
