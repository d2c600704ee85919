//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;
use crate::telemetry::{EventType, record_request, record_response};

/// Redirects an identifier to its original URL.
///
/// # Endpoint
///
/// `GET /{id}`
///
/// Answers `302 Found` with the stored URL in `Location`.
///
/// # Errors
///
/// Returns 404 Not Found if the identifier is unknown, never a redirect to an
/// empty location. Store failures and stored values that cannot be sent as a
/// header answer 500, store timeouts 503.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    record_request(EventType::Redirect);

    let result = redirect(&state, &id).await;

    let status = match &result {
        Ok(response) => response.status(),
        Err(e) => e.status_code(),
    };
    record_response(EventType::Redirect, status);

    result
}

async fn redirect(state: &AppState, id: &str) -> Result<Response, AppError> {
    let url = state.shortener.resolve(id).await?;

    let location = HeaderValue::try_from(url).map_err(|e| {
        AppError::StorageFailure(format!("stored URL for '{id}' is not a valid header: {e}"))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
