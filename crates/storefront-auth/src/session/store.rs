//! Refresh token storage operations wrapping the repository.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use storefront_core::AppResult;
use storefront_core::timeout::with_timeout;
use storefront_database::repositories::RefreshTokenRepository;
use storefront_entity::refresh_token::{ClientMetadata, NewRefreshToken, RefreshTokenRecord};

use super::token_hash::TokenHash;

/// Server-side state of issued refresh tokens.
///
/// Every call runs under the store deadline and fails with
/// `ServiceUnavailable` when it elapses.
#[derive(Clone)]
pub struct RefreshTokenStore {
    repo: Arc<dyn RefreshTokenRepository>,
    timeout: Duration,
}

impl std::fmt::Debug for RefreshTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenStore")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RefreshTokenStore {
    /// Creates a new refresh token store.
    pub fn new(repo: Arc<dyn RefreshTokenRepository>, timeout: Duration) -> Self {
        Self { repo, timeout }
    }

    /// Records a newly issued refresh token as active.
    pub async fn persist(
        &self,
        user_id: Uuid,
        token_hash: &TokenHash,
        expires_at: DateTime<Utc>,
        metadata: ClientMetadata,
    ) -> AppResult<RefreshTokenRecord> {
        let data = NewRefreshToken {
            user_id,
            token_hash: token_hash.as_str().to_owned(),
            expires_at,
            metadata,
        };
        with_timeout(self.timeout, "refresh_token.persist", self.repo.insert(data)).await
    }

    /// Returns the record only if it is active and unexpired.
    pub async fn lookup_active(&self, token_hash: &TokenHash) -> AppResult<Option<RefreshTokenRecord>> {
        with_timeout(
            self.timeout,
            "refresh_token.lookup_active",
            self.repo.find_active_by_hash(token_hash.as_str(), Utc::now()),
        )
        .await
    }

    /// Deactivates a record and forces its expiry to now.
    ///
    /// Unknown or already inactive hashes succeed; the flag says whether a
    /// live record was changed.
    pub async fn invalidate(&self, token_hash: &TokenHash) -> AppResult<bool> {
        with_timeout(
            self.timeout,
            "refresh_token.invalidate",
            self.repo.invalidate(token_hash.as_str(), Utc::now()),
        )
        .await
    }

    /// Deactivates every live record of a user.
    pub async fn invalidate_all_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        with_timeout(
            self.timeout,
            "refresh_token.invalidate_all_for_user",
            self.repo.invalidate_all_for_user(user_id, Utc::now()),
        )
        .await
    }

    /// Deletes dead records.
    pub async fn purge_expired(&self) -> AppResult<u64> {
        with_timeout(
            self.timeout,
            "refresh_token.purge_expired",
            self.repo.purge_expired(Utc::now()),
        )
        .await
    }
}
