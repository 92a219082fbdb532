//! Cart-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by cart mutations.
///
/// Lookups of absent lines are not errors: removing or updating an item that
/// is not in the cart is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Added quantity was zero or negative.
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    /// The line would exceed the per-line limit.
    #[error("A cart line holds at most {max} units, requested {requested}")]
    QuantityLimit { requested: i64, max: u32 },

    /// The resulting amount is too large to represent.
    #[error("Amount for {quantity} x {item} is too large")]
    AmountTooLarge { item: String, quantity: u32 },
}

impl CartError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CartError::InvalidQuantity(_)
            | CartError::QuantityLimit { .. }
            | CartError::AmountTooLarge { .. } => ErrorCode::OutOfRange,
        }
    }
}

impl From<CartError> for DomainError {
    fn from(err: CartError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
