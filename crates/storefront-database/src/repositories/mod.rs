//! Repository traits and their PostgreSQL implementations.
//!
//! Services depend on the traits only; the backend is picked at startup.

pub mod order;
pub mod refresh_token;
pub mod user;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use storefront_core::AppResult;
use storefront_entity::order::Order;
use storefront_entity::refresh_token::{NewRefreshToken, RefreshTokenRecord};
use storefront_entity::user::{CreateUser, User};

pub use order::PgOrderRepository;
pub use refresh_token::PgRefreshTokenRepository;
pub use user::PgUserRepository;

/// Account lookups and admin mutations.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Find a user by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email, case-insensitively.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a user. A taken email is a conflict.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// List users ordered by creation time.
    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<User>>;

    /// Set the active flag. Returns `false` if the user does not exist.
    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<bool>;

    /// Delete a user. Returns `false` if the user does not exist.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Persistence for hashed refresh tokens.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Insert a new active record. A duplicate hash is a conflict.
    async fn insert(&self, data: NewRefreshToken) -> AppResult<RefreshTokenRecord>;

    /// Find the record for `token_hash` that is active and unexpired at `now`.
    async fn find_active_by_hash(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<RefreshTokenRecord>>;

    /// Deactivate one record and force its expiry to `now`.
    ///
    /// Returns `true` only if an active record was changed.
    async fn invalidate(&self, token_hash: &str, now: DateTime<Utc>) -> AppResult<bool>;

    /// Deactivate every active record of a user. Returns the number changed.
    async fn invalidate_all_for_user(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<u64>;

    /// Delete records that are inactive or expired at `now`.
    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

/// Read access to orders for ownership checks.
#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    /// Find an order by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>>;
}
