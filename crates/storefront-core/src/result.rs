//! Convenience result type alias for Storefront.

use crate::error::AppError;

/// A specialized `Result` type for Storefront operations.
pub type AppResult<T> = Result<T, AppError>;
