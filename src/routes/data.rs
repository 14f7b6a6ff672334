//! Handlers for reading and appending records.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{NewRecord, Record};

/// Success message returned by [`create`].
pub const CREATED_MESSAGE: &str = "Data added successfully";

/// Body of a successful POST /data response.
#[derive(Debug, Serialize)]
pub struct AppendResponse {
    pub message: &'static str,
    pub data: Record,
}

/// GET /api/data
#[instrument(name = "data::list", skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let records = state.store.read_all().await.map_err(ApiError::Read)?;
    Ok(Json(records))
}

/// POST /data
///
/// The body must be a JSON object whose `name` and `address` are present and
/// not falsy. Field types are not checked. A body that is not JSON at all
/// (wrong content type, malformed) is treated as missing fields.
#[instrument(name = "data::create", skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<AppendResponse>), ApiError> {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unusable request body");
            return Err(ApiError::Validation);
        }
    };

    let entry = NewRecord::from_body(&body).ok_or(ApiError::Validation)?;

    let record = state.store.append(entry).await.map_err(ApiError::Write)?;
    tracing::info!(id = record.id, "Record added");

    Ok((
        StatusCode::CREATED,
        Json(AppendResponse {
            message: CREATED_MESSAGE,
            data: record,
        }),
    ))
}
