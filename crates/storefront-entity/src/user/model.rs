//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::user_type::UserType;

/// A registered storefront account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Unique email address, used as the login name.
    pub email: String,
    /// Argon2id PHC-format password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Customer or admin.
    pub user_type: UserType,
    /// Deactivated accounts cannot log in or refresh.
    pub is_active: bool,
    /// Phone number (optional).
    pub phone: Option<String>,
    /// Whether the phone number has been verified.
    pub phone_verified: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.user_type.is_admin()
    }

    /// Check if the user may hold a session right now.
    pub fn can_login(&self) -> bool {
        self.is_active
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned type.
    pub user_type: UserType,
    /// Phone number (optional).
    pub phone: Option<String>,
}

impl CreateUser {
    /// Materializes a new active user row with a fresh id.
    pub fn into_user(self) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            user_type: self.user_type,
            is_active: true,
            phone: self.phone,
            phone_verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}
