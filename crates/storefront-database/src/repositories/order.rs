//! PostgreSQL order repository.

use async_trait::async_trait;
use uuid::Uuid;

use storefront_core::AppResult;
use storefront_core::error::{AppError, ErrorKind};
use storefront_entity::order::Order;

use super::OrderRepository;
use crate::connection::DatabasePool;

/// Orders table backed by sqlx.
#[derive(Debug, Clone)]
pub struct PgOrderRepository {
    db: DatabasePool,
}

impl PgOrderRepository {
    /// Create a new order repository.
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(self.db.get().await?)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find order", e))
    }
}
