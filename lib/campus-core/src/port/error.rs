use thiserror::Error;

use crate::provider::http_client;

/// Failures reported by fetch and mutation ports.
///
/// Cloneable so that a single in-flight request can be shared by several waiters.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PortError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Backend responded with status {0}")]
    Status(u16),

    #[error("Record not found")]
    NotFound,

    #[error("Response could not be decoded: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<http_client::Error> for PortError {
    fn from(error: http_client::Error) -> Self {
        match error {
            http_client::Error::Status(status) if status.0 == 404 => Self::NotFound,
            http_client::Error::Status(status) => Self::Status(status.0),
            http_client::Error::Json(error) => Self::Decode(error.to_string()),
            http_client::Error::InvalidRequest(message) => Self::InvalidRequest(message),
            http_client::Error::Transport(message) => Self::Transport(message),
        }
    }
}
