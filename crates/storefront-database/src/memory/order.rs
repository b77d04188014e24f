//! In-memory order repository.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use storefront_core::AppResult;
use storefront_entity::order::Order;

use crate::repositories::OrderRepository;

/// Orders keyed by ID. Orders are written by seeding only.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderRepository {
    orders: Arc<DashMap<Uuid, Order>>,
}

impl MemoryOrderRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an order.
    pub fn insert(&self, order: Order) {
        self.orders.insert(order.id, order);
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        Ok(self.orders.get(&id).map(|o| o.value().clone()))
    }
}
