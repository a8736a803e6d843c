use thiserror::Error;

use crate::port::error::PortError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Mutation failed: {0}")]
    Mutation(#[from] PortError),
    #[error("List controller disposed")]
    Disposed,
    #[error("Missing backend configuration")]
    MissingBackendConfig,
    #[error("Invalid backend URL `{0}`")]
    InvalidBackendUrl(String),
    #[error("HTTP client setup failed: {0}")]
    HttpClient(String),
}
