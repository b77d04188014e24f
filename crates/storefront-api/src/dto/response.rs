//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_entity::order::Order;
use storefront_entity::user::User;

/// The user as shown after login or refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// `customer` or `admin`.
    pub role: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.user_type.to_string(),
        }
    }
}

/// Body of login and refresh responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// The signed-in user.
    pub user: SessionUser,
}

/// Full user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// `customer` or `admin`.
    pub role: String,
    /// Whether the account may log in.
    pub is_active: bool,
    /// Phone number.
    pub phone: Option<String>,
    /// Whether the phone number is verified.
    pub phone_verified: bool,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            role: user.user_type.to_string(),
            name: user.name,
            email: user.email,
            is_active: user.is_active,
            phone: user.phone,
            phone_verified: user.phone_verified,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Single-user envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    /// The user.
    pub user: UserResponse,
}

/// Page of users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    /// Users in this page.
    pub users: Vec<UserResponse>,
    /// Current page.
    pub page: u64,
    /// Items per page.
    pub per_page: u64,
}

/// Single-order envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEnvelope {
    /// The order.
    pub order: Order,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Builds a message body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// `memory`, `connected`, `unavailable`, or `not_connected`.
    pub database: String,
}
