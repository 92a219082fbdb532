//! Catalog source configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the product catalog is read from
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// JSON or YAML catalog file (format follows the extension)
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("catalog.path"));
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("catalog.json")
}
