//! Error types for the session layer.

use brief_client::ClientError;

/// Errors surfaced by the session orchestrator.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// A brief run is already in flight; the submission was refused.
    #[error("a brief run is already in flight")]
    Busy,
    /// The session was reset while the call was in flight; its settlement
    /// was discarded without touching the fresh session's state.
    #[error("the session was reset while the call was in flight")]
    Superseded,
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("session state error: {0}")]
    State(String),
}
