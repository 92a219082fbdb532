//! Adapters - Implementations of port interfaces.
//!
//! - `catalog` - Catalog sources (JSON/YAML file, in-memory)
//! - `storage` - Order stores (JSON file, in-memory)

pub mod catalog;
pub mod storage;

pub use catalog::{CatalogFormat, FileCatalogSource, InMemoryCatalogSource};
pub use storage::{FileOrderStore, InMemoryOrderStore};
