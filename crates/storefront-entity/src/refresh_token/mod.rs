//! Refresh token records.

pub mod model;

pub use model::{ClientMetadata, NewRefreshToken, RefreshTokenRecord};
