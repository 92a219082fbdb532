//! Catalog module - the shared, read-only item set.
//!
//! A catalog is loaded once per process from a [`CatalogDocument`] and then
//! queried by every session through [`CatalogIndex`].

mod document;
mod entry;
mod errors;
mod index;

pub use document::{CatalogDocument, CategoryDocument, ItemDocument};
pub use entry::CatalogEntry;
pub use errors::CatalogError;
pub use index::{CatalogIndex, ProductFilter};
