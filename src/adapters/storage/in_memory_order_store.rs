//! In-Memory Order Store Adapter
//!
//! Keeps orders in a vector behind a lock. Useful for tests and for running
//! without a writable disk.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::order::Order;
use crate::ports::{OrderStore, StoreError};

/// In-memory storage for placed orders
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with orders
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(RwLock::new(orders)),
        }
    }

    /// Number of stored orders
    pub async fn count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Clear all stored orders (useful for tests)
    pub async fn clear(&self) {
        self.orders.write().await.clear();
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn load_all(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.orders.read().await.clone())
    }

    async fn append(&self, order: &Order) -> Result<usize, StoreError> {
        let mut orders = self.orders.write().await;
        orders.push(order.clone());
        Ok(orders.len())
    }
}
