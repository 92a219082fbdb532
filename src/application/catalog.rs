//! Catalog loading - builds the shared index from a catalog source.

use crate::domain::catalog::{CatalogError, CatalogIndex};
use crate::ports::CatalogSource;

/// Outcome of loading the catalog at startup.
#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub index: CatalogIndex,

    /// Set when the source could not be read; the index is then empty.
    pub unavailable: Option<CatalogError>,

    /// Entries dropped for bad data or duplicate ids.
    pub skipped: Vec<CatalogError>,
}

impl CatalogLoad {
    pub fn is_available(&self) -> bool {
        self.unavailable.is_none()
    }
}

/// Loads and indexes the catalog. Never fails: an unreadable source yields an
/// empty index plus the `CatalogUnavailable` condition.
pub async fn load_catalog(source: &dyn CatalogSource) -> CatalogLoad {
    let document = match source.load().await {
        Ok(document) => document,
        Err(err) => {
            tracing::error!(
                "Catalog {} unavailable, continuing with an empty catalog: {}",
                source.describe(),
                err
            );
            return CatalogLoad {
                index: CatalogIndex::empty(),
                unavailable: Some(err),
                skipped: Vec::new(),
            };
        }
    };

    let (index, skipped) = CatalogIndex::from_document(document);
    for issue in &skipped {
        tracing::warn!("{}", issue);
    }
    tracing::info!(
        "Loaded {} catalog items in {} categories from {}",
        index.len(),
        index.categories().len(),
        source.describe()
    );

    CatalogLoad {
        index,
        unavailable: None,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::InMemoryCatalogSource;
    use crate::domain::catalog::{CatalogDocument, CategoryDocument, ItemDocument};
    use crate::domain::foundation::ErrorCode;
    use rust_decimal_macros::dec;

    fn item(id: &str, name: &str, price: rust_decimal::Decimal) -> ItemDocument {
        ItemDocument {
            id: id.to_string(),
            name: name.to_string(),
            price,
            tags: Vec::new(),
            description: None,
        }
    }

    #[tokio::test]
    async fn unavailable_source_degrades_to_empty_catalog() {
        let source = InMemoryCatalogSource::unavailable("catalog.json not found");

        let load = load_catalog(&source).await;

        assert!(load.index.is_empty());
        assert!(!load.is_available());
        assert_eq!(
            load.unavailable.map(|e| e.code()),
            Some(ErrorCode::CatalogUnavailable)
        );
    }

    #[tokio::test]
    async fn bad_entries_are_skipped_not_fatal() {
        let source = InMemoryCatalogSource::new(CatalogDocument {
            store_name: None,
            categories: vec![CategoryDocument {
                name: "Pantry".to_string(),
                items: vec![
                    item("pb-1", "Peanut Butter", dec!(3.50)),
                    item("pb-1", "Peanut Butter Again", dec!(4.00)),
                    item("bad-1", "Refund", dec!(-1)),
                ],
            }],
        });

        let load = load_catalog(&source).await;

        assert!(load.is_available());
        assert_eq!(load.index.len(), 1);
        assert_eq!(load.skipped.len(), 2);
    }
}
