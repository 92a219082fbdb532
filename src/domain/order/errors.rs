//! Order-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, OrderId};

/// Errors raised while placing or reading orders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty; nothing to order")]
    EmptyCart,

    /// The ledger holds no orders yet.
    #[error("No orders have been placed yet")]
    NoOrders,

    /// The order could not be written to the ledger.
    #[error("Failed to persist order: {0}")]
    Persistence(String),

    /// The ledger did not finish writing in time.
    #[error("Order store write timed out after {millis} ms")]
    Timeout { millis: u64 },

    /// The write outlived its deadline and the order was not yet visible in
    /// the store. It may still land, so it must not be placed again blindly.
    #[error("Order {order_id} was not confirmed within {millis} ms")]
    Unconfirmed { order_id: OrderId, millis: u64 },
}

impl OrderError {
    pub fn persistence(message: impl Into<String>) -> Self {
        OrderError::Persistence(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            OrderError::EmptyCart => ErrorCode::CartEmpty,
            OrderError::NoOrders => ErrorCode::NoOrders,
            OrderError::Persistence(_) => ErrorCode::PersistenceFailed,
            OrderError::Timeout { .. } => ErrorCode::Timeout,
            OrderError::Unconfirmed { .. } => ErrorCode::OrderUnconfirmed,
        }
    }

    /// Persistence failures and read timeouts may succeed when retried.
    /// An unconfirmed write is not retryable: repeating it could store the
    /// order twice.
    pub fn is_retryable(&self) -> bool {
        matches!(self, OrderError::Persistence(_) | OrderError::Timeout { .. })
    }
}

impl From<OrderError> for DomainError {
    fn from(err: OrderError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            OrderError::Unconfirmed { order_id, .. } => {
                domain.with_detail("order_id", order_id.to_string())
            }
            _ => domain,
        }
    }
}
