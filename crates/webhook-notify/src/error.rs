use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a single webhook delivery. All of them are terminal.
///
/// Messages embed the underlying error; no variant sets a `source`.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to serialize payload: {0}")]
    Serialize(serde_json::Error),
    #[error("failed to build the request: {0}")]
    Request(reqwest::Error),
    #[error("failed to send the request: {0}")]
    Transport(reqwest::Error),
    #[error("server error: {status}, response: {body}")]
    Status { status: StatusCode, body: String },
    #[error("server error: {status}, failed to read response: {error}")]
    UnreadableBody {
        status: StatusCode,
        error: reqwest::Error,
    },
}

impl NotifyError {
    /// Status code returned by the webhook, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            NotifyError::Status { status, .. } | NotifyError::UnreadableBody { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, NotifyError>;
