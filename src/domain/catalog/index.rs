//! Read-only lookup structure over the catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CatalogDocument, CatalogEntry, CatalogError, CategoryDocument, ItemDocument};
use crate::domain::foundation::{ItemId, Money};

/// Highest unit price, in cents, a catalog entry may carry.
pub const MAX_UNIT_PRICE_CENTS: u64 = 100_000_000;

/// Optional criteria for listing products. All present criteria must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Category name, case-insensitive exact match.
    #[serde(default)]
    pub category: Option<String>,
    /// Tag, case-insensitive exact match.
    #[serde(default)]
    pub tag: Option<String>,
    /// Inclusive upper bound on unit price.
    #[serde(default)]
    pub max_price: Option<Decimal>,
}

/// Immutable, load-once index over catalog entries.
///
/// Iteration order is the order of the source document (categories first,
/// then items within each category). Lookups never rank results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogIndex {
    store_name: Option<String>,
    categories: Vec<String>,
    entries: Vec<CatalogEntry>,
}

impl CatalogIndex {
    /// Returns an index with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds an index from entries already validated by the caller.
    ///
    /// Categories are taken from the entries in first-seen order.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for entry in &entries {
            if !categories.contains(&entry.category) {
                categories.push(entry.category.clone());
            }
        }
        Self {
            store_name: None,
            categories,
            entries,
        }
    }

    /// Builds an index from a source document.
    ///
    /// Entries with a blank id, a negative price or an id already seen are
    /// skipped and reported in the returned issue list.
    pub fn from_document(document: CatalogDocument) -> (Self, Vec<CatalogError>) {
        let mut issues = Vec::new();
        let mut entries: Vec<CatalogEntry> = Vec::new();
        let mut categories = Vec::with_capacity(document.categories.len());

        for category in document.categories {
            categories.push(category.name.clone());
            for item in category.items {
                match Self::entry_from_item(&category.name, item) {
                    Ok(entry) if entries.iter().any(|e| e.id == entry.id) => {
                        issues.push(CatalogError::DuplicateId(entry.id.to_string()));
                    }
                    Ok(entry) => entries.push(entry),
                    Err(issue) => issues.push(issue),
                }
            }
        }

        let index = Self {
            store_name: document.store_name,
            categories,
            entries,
        };
        (index, issues)
    }

    fn entry_from_item(category: &str, item: ItemDocument) -> Result<CatalogEntry, CatalogError> {
        let id = ItemId::new(item.id.clone())
            .map_err(|e| CatalogError::invalid_entry(&item.id, e.to_string()))?;
        let price = Money::try_new(item.price)
            .map_err(|e| CatalogError::invalid_entry(&item.id, e.to_string()))?;
        let max_price = Money::from_cents(MAX_UNIT_PRICE_CENTS);
        if price > max_price {
            return Err(CatalogError::invalid_entry(
                &item.id,
                format!("price {} exceeds the limit of {}", price, max_price),
            ));
        }

        let entry = CatalogEntry::new(id, item.name, price, category, item.tags);
        Ok(match item.description {
            Some(description) => entry.with_description(description),
            None => entry,
        })
    }

    /// Returns the first entry whose name contains `query`, ignoring case.
    ///
    /// This is a first-match policy, not a best-match one: with "Marinara
    /// Sauce" listed before "BBQ Sauce", the query "sauce" always yields the
    /// marinara. A blank query matches nothing.
    pub fn find_by_name(&self, query: &str) -> Option<&CatalogEntry> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        self.entries.iter().find(|entry| entry.name_contains(&query))
    }

    /// Returns every entry carrying `tag`, ignoring case, in catalog order.
    pub fn find_by_tag(&self, tag: &str) -> Vec<&CatalogEntry> {
        self.entries.iter().filter(|entry| entry.has_tag(tag)).collect()
    }

    /// Returns the entry with the given id.
    pub fn find_by_id(&self, id: &ItemId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Returns every entry of a category, ignoring case, in catalog order.
    pub fn entries_in_category(&self, category: &str) -> Vec<&CatalogEntry> {
        let category = category.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.category.to_lowercase() == category)
            .collect()
    }

    /// Returns the entries matching every criterion of `filter`.
    pub fn filter(&self, filter: &ProductFilter) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|entry| {
                filter
                    .category
                    .as_ref()
                    .map_or(true, |c| entry.category.to_lowercase() == c.to_lowercase())
            })
            .filter(|entry| filter.tag.as_ref().map_or(true, |t| entry.has_tag(t)))
            .filter(|entry| {
                filter
                    .max_price
                    .map_or(true, |max| entry.price.amount() <= max)
            })
            .collect()
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Category names in source order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn store_name(&self) -> Option<&str> {
        self.store_name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Regroups the indexed entries into the document shape.
    pub fn to_document(&self) -> CatalogDocument {
        let categories = self
            .categories
            .iter()
            .map(|name| CategoryDocument {
                name: name.clone(),
                items: self
                    .entries
                    .iter()
                    .filter(|entry| &entry.category == name)
                    .map(|entry| ItemDocument {
                        id: entry.id.to_string(),
                        name: entry.name.clone(),
                        price: entry.price.amount(),
                        tags: entry.tags.clone(),
                        description: entry.description.clone(),
                    })
                    .collect(),
            })
            .collect();

        CatalogDocument {
            store_name: self.store_name.clone(),
            categories,
        }
    }
}
