/// Relay error types
///
/// Ingress errors are turned into HTTP responses with a JSON body
/// `{ "error": "..." }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Result type for relay operations
pub type RelayResult<T> = std::result::Result<T, RelayError>;

/// Relay error
#[derive(Debug, Error)]
pub enum RelayError {
    /// Ingress body is not a JSON object
    #[error("Malformed camera state: {0}")]
    MalformedPayload(String),

    /// Listening socket could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Server stopped with an I/O error
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            RelayError::Bind { .. } | RelayError::Serve(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
