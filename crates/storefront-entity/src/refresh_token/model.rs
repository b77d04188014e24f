//! Refresh token record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted refresh token.
///
/// Only the SHA-256 hash of the raw token is stored. A record is dead once
/// it is inactive *or* past its expiry; both are always checked together.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshTokenRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// The user this token was issued to.
    pub user_id: Uuid,
    /// Hex SHA-256 digest of the raw token.
    pub token_hash: String,
    /// Cleared on logout or revocation.
    pub is_active: bool,
    /// Absolute expiry. Forced to the invalidation time on logout.
    pub expires_at: DateTime<Utc>,
    /// When the token was issued (login time).
    pub created_at: DateTime<Utc>,
    /// User-Agent header of the login request.
    pub user_agent: Option<String>,
    /// Client IP of the login request.
    pub ip_address: Option<String>,
}

impl RefreshTokenRecord {
    /// Check whether the record can still authorize a refresh at `now`.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expires_at > now
    }
}

/// Optional client details captured at login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientMetadata {
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// Client IP address.
    pub ip_address: Option<String>,
}

/// Data required to persist a newly issued refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRefreshToken {
    /// Owning user.
    pub user_id: Uuid,
    /// Hex SHA-256 digest of the raw token.
    pub token_hash: String,
    /// Absolute expiry, matching the token's `exp`.
    pub expires_at: DateTime<Utc>,
    /// Client details.
    pub metadata: ClientMetadata,
}

impl NewRefreshToken {
    /// Materializes the active record row.
    pub fn into_record(self) -> RefreshTokenRecord {
        RefreshTokenRecord {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            token_hash: self.token_hash,
            is_active: true,
            expires_at: self.expires_at,
            created_at: Utc::now(),
            user_agent: self.metadata.user_agent,
            ip_address: self.metadata.ip_address,
        }
    }
}
