//! In-Memory Catalog Source Adapter

use async_trait::async_trait;

use crate::domain::catalog::{CatalogDocument, CatalogError};
use crate::ports::CatalogSource;

/// Catalog source that hands out a fixed document, or a fixed failure
#[derive(Debug, Clone)]
pub struct InMemoryCatalogSource {
    document: Result<CatalogDocument, CatalogError>,
}

impl InMemoryCatalogSource {
    pub fn new(document: CatalogDocument) -> Self {
        Self {
            document: Ok(document),
        }
    }

    /// A source whose every load fails as unavailable
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            document: Err(CatalogError::unavailable(reason)),
        }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn load(&self) -> Result<CatalogDocument, CatalogError> {
        self.document.clone()
    }

    fn describe(&self) -> String {
        "in-memory catalog".to_string()
    }
}
