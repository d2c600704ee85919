//! Deadline enforcement for store calls.

use std::future::Future;
use std::time::Duration;

use crate::domain::repositories::StoreError;
use crate::error::AppError;

/// Runs a store call under `limit`.
///
/// Store errors become [`AppError::StorageFailure`]; an elapsed deadline
/// becomes [`AppError::StorageTimeout`]. Neither is retried.
pub async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(AppError::from),
        Err(_) => Err(AppError::StorageTimeout(limit)),
    }
}
