//! Health check endpoint.
//!
//! A liveness probe only: it never touches the record store, so it keeps
//! answering even when the data file is missing or corrupt.

use crate::config::HEALTH_BODY;

/// Health check handler.
pub async fn health() -> &'static str {
    HEALTH_BODY
}
