//! Session layer for the project-brief intake workflow.
//!
//! Owns conversation and document state, sequences brief-generation calls
//! through a `BriefService`, and reconciles asynchronous settlements into
//! the state presentation adapters render from.

pub mod conversation;
pub mod documents;
pub mod error;
pub mod orchestrator;

pub use conversation::ConversationLog;
pub use documents::DocumentRegistry;
pub use error::SessionError;
pub use orchestrator::{SessionOrchestrator, SessionSnapshot};
