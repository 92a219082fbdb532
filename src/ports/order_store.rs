//! Order Store Port - Interface for the durable order ledger storage.
//!
//! Implementations hold the full ordered record set. `append` must be
//! serialized internally so concurrent placements never lose an order.

use async_trait::async_trait;

use crate::domain::order::Order;

/// Errors that can occur during order storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to serialize orders: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Order store unavailable: {0}")]
    Unavailable(String),
}

/// Port for reading and appending placed orders
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Load every stored order, oldest first.
    ///
    /// A missing or corrupt store reads as empty.
    ///
    /// # Errors
    /// Returns `StoreError` only if the storage medium itself fails
    async fn load_all(&self) -> Result<Vec<Order>, StoreError>;

    /// Append one order after the existing records.
    ///
    /// Returns the number of stored orders after the append.
    ///
    /// # Errors
    /// Returns `StoreError` if the updated record set could not be written;
    /// the previously stored records are left intact
    async fn append(&self, order: &Order) -> Result<usize, StoreError>;
}
