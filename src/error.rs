//! Application error type and its HTTP mapping.
//!
//! Every failure of the create and redirect paths surfaces as an [`AppError`].
//! Handlers turn it into a status-only response; no kind is retried here.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::repositories::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    /// The submitted URL is empty or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No mapping exists for the requested identifier.
    #[error("short identifier not found: {0}")]
    NotFound(String),

    /// The generator ran out of attempts before finding a free identifier.
    #[error("no free identifier after {attempts} attempts")]
    CapacityExhausted { attempts: u32 },

    /// A store read or write failed.
    #[error("storage failure: {0}")]
    StorageFailure(String),

    /// A store call did not finish within its deadline.
    #[error("storage call exceeded its {}ms deadline", .0.as_millis())]
    StorageTimeout(Duration),
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// HTTP status the inbound boundary answers with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::CapacityExhausted { .. } | AppError::StorageTimeout(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::StorageFailure(e.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        AppError::InvalidInput(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        status.into_response()
    }
}
