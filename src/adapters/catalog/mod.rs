//! Catalog source adapters.

mod file_catalog_source;
mod in_memory_catalog_source;

pub use file_catalog_source::{CatalogFormat, FileCatalogSource};
pub use in_memory_catalog_source::InMemoryCatalogSource;
