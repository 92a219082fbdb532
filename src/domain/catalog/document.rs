//! Serialized shape of a catalog source.
//!
//! A catalog document groups items under categories:
//!
//! ```json
//! {
//!   "store_name": "QuickMart",
//!   "categories": [
//!     { "name": "Pantry", "items": [
//!       { "id": "pb-1", "name": "Peanut Butter", "price": 3.50, "tags": ["vegan"] }
//!     ] }
//!   ]
//! }
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level catalog document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryDocument>,
}

/// A named group of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDocument {
    pub name: String,
    #[serde(default)]
    pub items: Vec<ItemDocument>,
}

/// One sellable item as written in the source.
///
/// Prices stay raw decimals here; the index validates them per entry so one
/// bad price never invalidates the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDocument {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
