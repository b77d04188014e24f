//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use storefront_auth::gate::AuthorizationGate;
use storefront_auth::session::{RefreshTokenStore, SessionManager};
use storefront_core::config::AppConfig;
use storefront_database::DatabasePool;
use storefront_database::repositories::OrderRepository;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL handle, absent with the in-memory backend
    pub db: Option<DatabasePool>,

    // ── Auth ─────────────────────────────────────────────────
    /// Session lifecycle manager
    pub session_manager: Arc<SessionManager>,
    /// Refresh token store, shared with the cleanup task
    pub refresh_store: Arc<RefreshTokenStore>,
    /// Admin-or-owner authorization
    pub gate: AuthorizationGate,

    // ── Repositories ─────────────────────────────────────────
    /// Order repository
    pub order_repo: Arc<dyn OrderRepository>,
}

impl AppState {
    /// Deadline for a single store call.
    pub fn store_timeout(&self) -> Duration {
        self.config.store.timeout()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db)
            .field("session_manager", &self.session_manager)
            .finish_non_exhaustive()
    }
}
