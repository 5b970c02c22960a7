use shared::{domain::StudentId, error::ValidationError};
use thiserror::Error;

/// Every failure the client can surface to a user.
///
/// `Display` is the user-visible message; a remote failure shows the
/// response body verbatim.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{}", remote_message(.status, .body))]
    Remote { status: u16, body: String },
    #[error("malformed response from record store: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("request to record store failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid record store url '{0}'")]
    InvalidServerUrl(String),
    #[error("student {0} is not in the current list")]
    NotInSnapshot(StudentId),
}

impl ClientError {
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        Self::Remote {
            status,
            body: body.into(),
        }
    }
}

fn remote_message(status: &u16, body: &str) -> String {
    if body.trim().is_empty() {
        format!("record store responded with HTTP {status}")
    } else {
        body.to_string()
    }
}
