//! Catalog Source Port - where the product catalog document comes from.

use async_trait::async_trait;

use crate::domain::catalog::{CatalogDocument, CatalogError};

/// Port for loading the catalog document once at startup
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load and parse the catalog document.
    ///
    /// # Errors
    /// Returns `CatalogError::Unavailable` if the source is missing or malformed
    async fn load(&self) -> Result<CatalogDocument, CatalogError>;

    /// Short description of the source for log lines.
    fn describe(&self) -> String;
}
