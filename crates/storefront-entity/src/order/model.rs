//! Order entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A placed order. Only the fields the API exposes on the detail view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order identifier.
    pub id: Uuid,
    /// The customer who placed the order.
    pub user_id: Uuid,
    /// Human-facing order number.
    pub order_number: String,
    /// Fulfilment status, as written by the order service.
    pub status: String,
    /// Order total in minor currency units.
    pub total_cents: i64,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}
