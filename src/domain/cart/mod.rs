//! Cart module - per-session shopping cart.
//!
//! # Invariants
//!
//! - Line names and prices are snapshots taken when the line is created
//! - No line ever holds a quantity below 1
//! - The cart total always equals the sum of line subtotals
//!
//! Carts are never persisted; only placed orders are durable.

mod aggregate;
mod errors;
mod line;
pub mod meals;

pub use aggregate::{Cart, CartLines, CartSummary, CartTotals, QuantityChange, MAX_LINE_QUANTITY};
pub use errors::CartError;
pub use line::{CartLine, LineSnapshot, NOTE_SEPARATOR};
pub use meals::{MealOutcome, MealRecipe};
