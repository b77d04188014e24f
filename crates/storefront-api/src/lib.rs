//! # storefront-api
//!
//! HTTP API layer for the storefront built on Axum.
//!
//! Provides the auth endpoints with their session cookies, the gated
//! profile, order, and admin endpoints, middleware (logging, CORS), request
//! extractors, DTOs, and error mapping.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{Repositories, build_app, build_state, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
