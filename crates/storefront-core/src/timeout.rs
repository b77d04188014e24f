//! Deadline wrapper for calls into a backing store.

use std::future::Future;
use std::time::Duration;

use tracing::error;

use crate::error::AppError;
use crate::result::AppResult;

/// Runs `fut` with a deadline.
///
/// An elapsed deadline becomes [`AppError::service_unavailable`] so callers can
/// tell "store unavailable" apart from the store's own answers.
pub async fn with_timeout<T, F>(limit: Duration, operation: &str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            error!(
                operation = %operation,
                timeout_ms = limit.as_millis() as u64,
                "Store call timed out"
            );
            Err(AppError::service_unavailable(format!(
                "Store unavailable: {operation} timed out"
            )))
        }
    }
}
