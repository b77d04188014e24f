//! Periodic purge of dead refresh token records.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info};

use storefront_core::error::AppError;

use super::store::RefreshTokenStore;

/// Deletes inactive and expired refresh token records.
#[derive(Debug, Clone)]
pub struct RefreshTokenCleanup {
    store: Arc<RefreshTokenStore>,
}

impl RefreshTokenCleanup {
    /// Creates a new cleanup handler.
    pub fn new(store: Arc<RefreshTokenStore>) -> Self {
        Self { store }
    }

    /// Runs a single cleanup cycle, returning the number of records removed.
    pub async fn run_cleanup(&self) -> Result<u64, AppError> {
        let purged = self.store.purge_expired().await?;
        if purged > 0 {
            info!(purged = purged, "Refresh token cleanup completed");
        }
        Ok(purged)
    }

    /// Runs cleanup every `interval` until `shutdown` flips to `true`.
    ///
    /// A failed cycle is logged and the loop carries on.
    pub async fn run_periodic(self, interval: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        info!(interval_secs = interval.as_secs(), "Refresh token cleanup started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.run_cleanup().await {
                        error!(error = %e, "Refresh token cleanup failed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Refresh token cleanup stopped");
    }
}
