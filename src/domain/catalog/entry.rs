//! Catalog entry value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ItemId, Money};

/// One immutable item of the catalog.
///
/// Entries are built once at load time and shared read-only by every
/// session; carts and orders copy the name and price they need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ItemId,
    pub name: String,
    pub price: Money,
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CatalogEntry {
    /// Creates an entry; duplicate tags (ignoring case) are dropped.
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
        tags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.into();
            if !unique.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
                unique.push(tag);
            }
        }

        Self {
            id,
            name: name.into(),
            price,
            category: category.into(),
            tags: unique,
            description: None,
        }
    }

    /// Attaches a free-text description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Case-insensitive substring match against the display name.
    pub fn name_contains(&self, query_lower: &str) -> bool {
        self.name.to_lowercase().contains(query_lower)
    }

    /// Case-insensitive exact match against the tag set.
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}
