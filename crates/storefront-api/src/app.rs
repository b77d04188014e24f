//! Application builder: wires repositories, services, router and
//! middleware into a running server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use storefront_auth::gate::AuthorizationGate;
use storefront_auth::jwt::{TokenIssuer, TokenValidator};
use storefront_auth::password::PasswordHasher;
use storefront_auth::session::{RefreshTokenCleanup, RefreshTokenStore, SessionManager};
use storefront_core::AppResult;
use storefront_core::config::AppConfig;
use storefront_core::error::AppError;
use storefront_database::DatabasePool;
use storefront_database::memory::{
    MemoryOrderRepository, MemoryRefreshTokenRepository, MemoryUserRepository,
};
use storefront_database::repositories::{
    OrderRepository, PgOrderRepository, PgRefreshTokenRepository, PgUserRepository,
    RefreshTokenRepository, UserRepository,
};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// The repository backend the services run on.
#[derive(Clone)]
pub struct Repositories {
    /// User repository.
    pub users: Arc<dyn UserRepository>,
    /// Refresh token repository.
    pub refresh_tokens: Arc<dyn RefreshTokenRepository>,
    /// Order repository.
    pub orders: Arc<dyn OrderRepository>,
    /// PostgreSQL handle, when that is the backend.
    pub db: Option<DatabasePool>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool handle.
    pub fn postgres(db: DatabasePool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(db.clone())),
            refresh_tokens: Arc::new(PgRefreshTokenRepository::new(db.clone())),
            orders: Arc::new(PgOrderRepository::new(db.clone())),
            db: Some(db),
        }
    }

    /// Empty in-process repositories.
    pub fn memory() -> Self {
        Self {
            users: Arc::new(MemoryUserRepository::new()),
            refresh_tokens: Arc::new(MemoryRefreshTokenRepository::new()),
            orders: Arc::new(MemoryOrderRepository::new()),
            db: None,
        }
    }
}

/// Builds the shared state. Fails on configuration the server cannot run
/// with, such as missing signing secrets or a wildcard CORS origin.
pub fn build_state(
    config: AppConfig,
    repos: Repositories,
    hasher: PasswordHasher,
) -> AppResult<AppState> {
    config.validate()?;
    let store_timeout = config.store.timeout();

    let issuer = Arc::new(TokenIssuer::new(&config.auth)?);
    let validator = Arc::new(TokenValidator::new(&config.auth)?);
    let refresh_store = Arc::new(RefreshTokenStore::new(
        Arc::clone(&repos.refresh_tokens),
        store_timeout,
    ));

    let session_manager = Arc::new(SessionManager::new(
        issuer,
        validator,
        Arc::clone(&refresh_store),
        Arc::clone(&repos.users),
        Arc::new(hasher),
        &config.auth,
        store_timeout,
    ));

    Ok(AppState {
        config: Arc::new(config),
        db: repos.db,
        session_manager,
        refresh_store,
        gate: AuthorizationGate::new(),
        order_repo: repos.orders,
    })
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = &state.config.server;
    let cors = build_cors_layer(&server.cors);
    let timeout = Duration::from_secs(server.request_timeout_seconds);

    build_router(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the server until Ctrl+C or SIGTERM, then drains and shuts down.
pub async fn run_server(config: AppConfig, repos: Repositories) -> AppResult<()> {
    info!("Starting Storefront server");

    let hasher = tokio::task::spawn_blocking(PasswordHasher::new)
        .await
        .map_err(|e| AppError::internal(format!("Password hasher init failed: {e}")))??;

    let db = repos.db.clone();
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let cleanup_interval = config.store.cleanup_interval();

    let state = build_state(config, repos, hasher)?;
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let cleanup_task = match cleanup_interval {
        Some(interval) => {
            let cleanup = RefreshTokenCleanup::new(Arc::clone(&state.refresh_store));
            Some(tokio::spawn(
                cleanup.run_periodic(interval, shutdown_rx.clone()),
            ))
        }
        None => {
            info!("Refresh token cleanup disabled");
            None
        }
    };

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(addr = %addr, "Storefront server listening");

    let mut server_shutdown = shutdown_rx.clone();
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        let _ = server_shutdown.wait_for(|stop| *stop).await;
    });
    let mut server_task = tokio::spawn(async move { server.await });

    let served = tokio::select! {
        result = &mut server_task => result,
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
            match tokio::time::timeout(grace, &mut server_task).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(grace_secs = grace.as_secs(), "Graceful shutdown timed out");
                    server_task.abort();
                    Ok(Ok(()))
                }
            }
        }
    };
    let _ = shutdown_tx.send(true);

    if let Some(task) = cleanup_task {
        if let Err(e) = task.await {
            error!(error = %e, "Cleanup task panicked");
        }
    }

    if let Some(db) = db {
        db.close().await;
    }

    match served {
        Ok(Ok(())) => {
            info!("Storefront server stopped");
            Ok(())
        }
        Ok(Err(e)) => Err(AppError::internal(format!("Server error: {e}"))),
        Err(e) => Err(AppError::internal(format!("Server task failed: {e}"))),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
