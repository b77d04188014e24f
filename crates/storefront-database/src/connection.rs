//! PostgreSQL connection pool management.
//!
//! The pool is created on first use and torn down explicitly on shutdown.
//! Clones share the same underlying pool.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::sync::OnceCell;
use tracing::info;

use storefront_core::config::DatabaseConfig;
use storefront_core::error::{AppError, ErrorKind};

/// Lazily-initialized handle to the sqlx PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    /// Connection settings used on first access.
    config: DatabaseConfig,
    /// The pool, once connected.
    cell: Arc<OnceCell<PgPool>>,
}

impl DatabasePool {
    /// Create an unconnected handle. No I/O happens until [`Self::get`].
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Create a handle and connect immediately.
    pub async fn connect(config: DatabaseConfig) -> Result<Self, AppError> {
        let handle = Self::new(config);
        handle.get().await?;
        Ok(handle)
    }

    /// Return the pool, connecting on first call.
    ///
    /// Concurrent first callers wait on the same connection attempt. A failed
    /// attempt leaves the handle unconnected so the next call retries.
    pub async fn get(&self) -> Result<&PgPool, AppError> {
        self.cell.get_or_try_init(|| open_pool(&self.config)).await
    }

    /// Whether the pool has been opened.
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        let pool = self.get().await?;
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    /// Close all connections in the pool, if it was ever opened.
    pub async fn close(&self) {
        if let Some(pool) = self.cell.get() {
            pool.close().await;
            info!("Database pool closed");
        }
    }
}

async fn open_pool(config: &DatabaseConfig) -> Result<PgPool, AppError> {
    info!(
        url = %mask_password(&config.url),
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Connecting to PostgreSQL"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .connect(&config.url)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to connect to database: {e}"),
                e,
            )
        })?;

    info!("Connected to PostgreSQL");
    Ok(pool)
}

/// Mask the password portion of a database URL for safe logging.
fn mask_password(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
            if colon_pos > scheme_end {
                return format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..]);
            }
        }
    }
    url.to_string()
}
