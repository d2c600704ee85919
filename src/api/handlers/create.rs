//! Handler for the create endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::create::{CreateRequest, CreateResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::telemetry::{EventType, record_request, record_response};

/// Creates a short URL for the submitted URL.
///
/// # Endpoint
///
/// `POST /create`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/a" }
/// ```
///
/// # Response
///
/// ```json
/// { "shortURL": "http://127.0.0.1:8081/ab12C9" }
/// ```
///
/// # Errors
///
/// Responds with an empty body and:
/// - 400 for unreadable JSON or an empty/malformed URL
/// - 500 when the store rejects the write
/// - 503 when the store times out or no free identifier was found
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateRequest>, JsonRejection>,
) -> Result<Json<CreateResponse>, AppError> {
    record_request(EventType::Create);

    let result = create(&state, payload).await;

    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status_code(),
    };
    record_response(EventType::Create, status);

    result
}

async fn create(
    state: &AppState,
    payload: Result<Json<CreateRequest>, JsonRejection>,
) -> Result<Json<CreateResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::invalid_input(e.body_text()))?;
    request.validate()?;

    let link = state.shortener.create(&request.url).await?;

    Ok(Json(CreateResponse {
        short_url: link.short_url,
    }))
}
