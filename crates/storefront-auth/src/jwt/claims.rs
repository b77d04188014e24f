//! Identity claims carried by access and refresh tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_entity::user::{User, UserType};

/// The identity triple every token carries.
///
/// All three fields are required on deserialization, and [`IdentityClaims::new`]
/// refuses an empty email, so an incomplete identity is never signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityClaims {
    /// The user's ID.
    pub user_id: Uuid,
    /// The user's email at issuance.
    pub email: String,
    /// The user's type at issuance.
    pub user_type: UserType,
}

impl IdentityClaims {
    /// Builds a claim set, rejecting an empty email.
    pub fn new(
        user_id: Uuid,
        email: impl Into<String>,
        user_type: UserType,
    ) -> Result<Self, AppError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(AppError::internal("Refusing to build claims without an email"));
        }
        Ok(Self {
            user_id,
            email,
            user_type,
        })
    }

    /// Builds the claim set for a stored user.
    pub fn for_user(user: &User) -> Result<Self, AppError> {
        Self::new(user.id, user.email.clone(), user.user_type)
    }

    /// Whether the caller holds the admin type.
    pub fn is_admin(&self) -> bool {
        self.user_type.is_admin()
    }
}

/// Which of the two token families a token belongs to.
///
/// Each kind is signed with its own secret, so a token of one kind never
/// verifies as the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Short-lived access token for API requests.
    Access,
    /// Long-lived refresh token for obtaining new access tokens.
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access => write!(f, "access"),
            Self::Refresh => write!(f, "refresh"),
        }
    }
}

/// The full signed payload: identity plus registered claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Identity fields, flattened into the top-level payload.
    #[serde(flatten)]
    pub identity: IdentityClaims,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token ID. Keeps two tokens issued in the same second distinct.
    pub jti: Uuid,
}
