//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CatalogSource` - Loads the product catalog document
//! - `OrderStore` - Durable, append-only storage for placed orders

mod catalog_source;
mod order_store;

pub use catalog_source::CatalogSource;
pub use order_store::{OrderStore, StoreError};
