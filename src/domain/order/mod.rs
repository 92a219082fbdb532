//! Order module - immutable checkout records.
//!
//! Orders are built from an [`OrderDraft`] (a cart snapshot or a single
//! catalog item) and only become [`Order`]s once the ledger assigns their
//! id and timestamp.

mod errors;
mod record;

pub use errors::OrderError;
pub use record::{Order, OrderDraft, OrderStatus};
