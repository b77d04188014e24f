//! In-memory refresh token repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use storefront_core::{AppError, AppResult};
use storefront_entity::refresh_token::{NewRefreshToken, RefreshTokenRecord};

use crate::repositories::RefreshTokenRepository;

/// Refresh token records keyed by token hash.
#[derive(Debug, Clone, Default)]
pub struct MemoryRefreshTokenRepository {
    records: Arc<DashMap<String, RefreshTokenRecord>>,
}

impl MemoryRefreshTokenRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, live or dead.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot of the record for `token_hash`, whatever its state.
    pub fn get(&self, token_hash: &str) -> Option<RefreshTokenRecord> {
        self.records.get(token_hash).map(|r| r.value().clone())
    }

    /// Snapshot of every record owned by `user_id`.
    pub fn records_for_user(&self, user_id: Uuid) -> Vec<RefreshTokenRecord> {
        self.records
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.value().clone())
            .collect()
    }
}

#[async_trait]
impl RefreshTokenRepository for MemoryRefreshTokenRepository {
    async fn insert(&self, data: NewRefreshToken) -> AppResult<RefreshTokenRecord> {
        match self.records.entry(data.token_hash.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("Refresh token already stored")),
            Entry::Vacant(slot) => {
                let record = data.into_record();
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find_active_by_hash(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<RefreshTokenRecord>> {
        Ok(self
            .records
            .get(token_hash)
            .filter(|r| r.is_usable_at(now))
            .map(|r| r.value().clone()))
    }

    async fn invalidate(&self, token_hash: &str, now: DateTime<Utc>) -> AppResult<bool> {
        match self.records.get_mut(token_hash) {
            Some(mut record) if record.is_active => {
                record.is_active = false;
                record.expires_at = now;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn invalidate_all_for_user(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<u64> {
        let mut changed = 0;
        for mut record in self.records.iter_mut() {
            if record.user_id == user_id && record.is_active {
                record.is_active = false;
                record.expires_at = now;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut purged = 0;
        self.records.retain(|_, r| {
            let keep = r.is_usable_at(now);
            if !keep {
                purged += 1;
            }
            keep
        });
        Ok(purged)
    }
}
