//! Error types for the remote brief client.

use thiserror::Error;

/// Errors from calls to the brief-generation backend.
///
/// `Clone` so a settled error can be stored as the session's last error
/// while also being returned to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("brief request failed with status {status}")]
    RequestFailed { status: u16 },
    #[error("upload failed with status {status}")]
    UploadFailed { status: u16 },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
