use http::StatusCode;

use super::connection::BoxError;
use crate::codec::DecodeError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("can't build request: {0}")]
    Request(#[from] http::Error),
    #[error("can't send request: {0}")]
    Transport(#[source] BoxError),
    #[error("can't encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("can't read response body: {0}")]
    Body(#[source] axum::Error),
    #[error("can't decode response body: {0}")]
    Decode(#[from] DecodeError),
    /// The server answered with an error status and an error object.
    #[error("request failed with status {status}: {error}")]
    Api {
        status: StatusCode,
        error: ams_errors::Error,
    },
    /// The server answered with an error status and no usable error object.
    #[error("request failed with status {status}")]
    Status { status: StatusCode },
}

impl ClientError {
    /// HTTP status of the failed request, when the server answered.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } | Self::Status { status } => Some(*status),
            _ => None,
        }
    }
}
