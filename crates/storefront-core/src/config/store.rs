//! Persistence backend configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest accepted per-call store deadline.
pub const MAX_TIMEOUT_MS: u64 = 60_000;
/// Longest accepted purge interval (one week).
pub const MAX_CLEANUP_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

/// Which repository implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// PostgreSQL through sqlx.
    #[default]
    Postgres,
    /// Process-local maps. Data is lost on restart.
    Memory,
}

/// Store-call limits and housekeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Repository backend.
    #[serde(default)]
    pub backend: StoreBackend,
    /// Deadline for a single store call, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Interval between purges of dead refresh-token records, in minutes.
    /// `0` disables the purge task.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_minutes: u64,
}

impl StoreConfig {
    /// Returns the per-call deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the purge interval, or `None` when the purge is disabled.
    pub fn cleanup_interval(&self) -> Option<Duration> {
        match self.cleanup_interval_minutes {
            0 => None,
            minutes => Some(Duration::from_secs(minutes.saturating_mul(60))),
        }
    }

    /// Rejects out-of-range deadlines and intervals.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(1..=MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(AppError::configuration(format!(
                "store.timeout_ms must be between 1 and {MAX_TIMEOUT_MS}"
            )));
        }
        if self.cleanup_interval_minutes > MAX_CLEANUP_INTERVAL_MINUTES {
            return Err(AppError::configuration(format!(
                "store.cleanup_interval_minutes must be at most {MAX_CLEANUP_INTERVAL_MINUTES}"
            )));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            timeout_ms: default_timeout_ms(),
            cleanup_interval_minutes: default_cleanup_interval(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_cleanup_interval() -> u64 {
    60
}
