//! Path parameters that are parsed only after authorization.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

use storefront_core::error::AppError;

use crate::error::ApiError;

/// Parses a UUID from a path segment.
pub fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::validation(format!("Invalid ID: {s}")))
}

/// The raw `{id}` segment of a route.
///
/// Extraction never looks at the contents, so a malformed ID cannot answer
/// before the authorization gate does. Call [`IdParam::parse`] after it.
#[derive(Debug, Clone)]
pub struct IdParam(pub String);

impl IdParam {
    /// The segment as a UUID.
    pub fn parse(&self) -> Result<Uuid, AppError> {
        parse_uuid(&self.0)
    }
}

impl<S> FromRequestParts<S> for IdParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        Ok(Self(raw))
    }
}
