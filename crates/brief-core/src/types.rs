use serde::{Deserialize, Serialize};

// =============================================================================
// Conversation
// =============================================================================

/// Attribution of a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One message in the dialogue history.
///
/// Turns are immutable once appended; their order is significant because the
/// history is sent verbatim to the brief-generation backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

// =============================================================================
// Documents
// =============================================================================

/// Lightweight pointer to an uploaded or attached file, not its content.
///
/// The `id` is unique within a session. It is assigned client-side for
/// placeholder attachments and server-side after a real upload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReference {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DocumentReference {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: None,
            notes: None,
        }
    }
}

/// Wire shape of a successful `POST /uploads` response.
///
/// The server returns the stored document record; fields beyond the
/// reference (extracted text, timestamps) are ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct UploadResponse {
    pub document: DocumentReference,
}

// =============================================================================
// Brief payload
// =============================================================================

/// Rolling intake summary maintained by the backend.
///
/// Every field is defaulted: the backend fills the summary in gradually as
/// the conversation progresses, so partial payloads are expected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPayload {
    pub project_title: String,
    pub problem: Option<String>,
    pub solution: Option<String>,
    pub target_users: Vec<String>,
    pub success_metrics: Vec<String>,
    pub constraints: Vec<String>,
    pub timeline: Option<String>,
    pub resources: Vec<String>,
    pub documents: Vec<String>,
    pub opportunity_areas: Vec<String>,
}

/// The structured project brief produced from the accumulated context.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BriefDocument {
    pub project_title: String,
    pub project_description: String,
    pub purpose: String,
    pub expected_outcomes: Vec<String>,
    pub business_model: Vec<String>,
    pub constraints: Vec<String>,
    pub timeline: String,
    pub target_users: Vec<String>,
    pub documents: Vec<String>,
    pub opportunity_areas: Vec<String>,
    pub suggested_reads: Vec<String>,
    pub ideas_board: Vec<String>,
    pub success_metrics: Vec<String>,
}

/// Result of one brief-generation run.
///
/// `thread_id` and `follow_up_questions` are required: a success body
/// missing either does not deserialize and is reported as a malformed
/// response rather than silently treated as empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BriefPayload {
    #[serde(default)]
    pub summary: SummaryPayload,
    #[serde(default)]
    pub brief: BriefDocument,
    pub follow_up_questions: Vec<String>,
    pub thread_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistant_message: Option<String>,
}

// =============================================================================
// Requests
// =============================================================================

/// Request body for `POST /briefs/run`.
///
/// Carries the full dialogue history and document set on every call; the
/// backend reconciles against its checkpoint for the thread.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BriefRunRequest {
    pub conversation: Vec<ConversationTurn>,
    pub documents: Vec<DocumentReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}
