//! Storefront Server: session and authorization core of the storefront
//! back end.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use storefront_api::Repositories;
use storefront_core::config::{AppConfig, StoreBackend};
use storefront_core::error::AppError;
use storefront_database::DatabasePool;
use storefront_database::migration::run_migrations;

#[tokio::main]
async fn main() {
    let env = std::env::var("STOREFRONT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, version = env!("CARGO_PKG_VERSION"), "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Pick the backend, prepare it, and serve.
async fn run(config: AppConfig) -> Result<(), AppError> {
    let repos = match config.store.backend {
        StoreBackend::Postgres => {
            // Connect eagerly so a bad URL fails at startup, not on first login.
            let db = DatabasePool::connect(config.database.clone()).await?;
            run_migrations(db.get().await?).await?;
            Repositories::postgres(db)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; all data is lost on restart");
            Repositories::memory()
        }
    };

    storefront_api::run_server(config, repos).await
}
