//! Error types for the record store and the HTTP API.
//!
//! Store failures never reach clients in detail: the handler decides whether a
//! failure was part of a read or an append and maps it to the matching generic
//! message. `ApiError`'s `Display` is the client-facing message; the underlying
//! cause is only reachable through `source()` and the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::io;

/// Failure while reading or rewriting the backing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store does not contain a JSON array")]
    NotAnArray,

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by the API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Name and address are required")]
    Validation,

    #[error("Failed to read data")]
    Read(#[source] StoreError),

    #[error("Failed to write data")]
    Write(#[source] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation => StatusCode::BAD_REQUEST,
            ApiError::Read(_) | ApiError::Write(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation => {
                tracing::debug!("Rejected request: {}", self);
            }
            ApiError::Read(cause) => {
                tracing::error!(error = %cause, "Error reading data store");
            }
            ApiError::Write(cause) => {
                tracing::error!(error = %cause, "Error writing data store");
            }
        }

        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_bad_request() {
        let err = ApiError::Validation;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Name and address are required");
    }

    #[test]
    fn test_store_failures_hide_cause() {
        let read = ApiError::Read(StoreError::NotAnArray);
        let write = ApiError::Write(StoreError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "denied",
        )));

        assert_eq!(read.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read.to_string(), "Failed to read data");
        assert_eq!(write.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(write.to_string(), "Failed to write data");
        assert!(std::error::Error::source(&write).is_some());
    }
}
