//! File-based Catalog Source Adapter
//!
//! Reads the catalog document from disk. Files ending in `.yaml` or `.yml`
//! are parsed as YAML, everything else as JSON.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::catalog::{CatalogDocument, CatalogError};
use crate::ports::CatalogSource;

/// Document formats the file source understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// Picks the format from the file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                CatalogFormat::Yaml
            }
            _ => CatalogFormat::Json,
        }
    }

    fn parse(self, raw: &str) -> Result<CatalogDocument, String> {
        match self {
            CatalogFormat::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
            CatalogFormat::Yaml => serde_yaml::from_str(raw).map_err(|e| e.to_string()),
        }
    }
}

/// Catalog document stored in a local file
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
    format: CatalogFormat,
}

impl FileCatalogSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = CatalogFormat::from_path(&path);
        Self { path, format }
    }

    pub fn format(&self) -> CatalogFormat {
        self.format
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn load(&self) -> Result<CatalogDocument, CatalogError> {
        let raw = fs::read_to_string(&self.path).await.map_err(|e| {
            CatalogError::unavailable(format!("cannot read {}: {}", self.path.display(), e))
        })?;

        self.format.parse(&raw).map_err(|e| {
            CatalogError::unavailable(format!("cannot parse {}: {}", self.path.display(), e))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const JSON: &str = r#"{
        "store_name": "QuickMart",
        "categories": [
            { "name": "Bakery", "items": [ { "id": "bread-1", "name": "Bread", "price": 2.00 } ] }
        ]
    }"#;

    const YAML: &str = "
categories:
  - name: Pantry
    items:
      - id: pb-1
        name: Peanut Butter
        price: 3.50
        tags: [spread]
";

    #[test]
    fn format_follows_extension() {
        assert_eq!(CatalogFormat::from_path(Path::new("c.yaml")), CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::from_path(Path::new("c.YML")), CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::from_path(Path::new("c.json")), CatalogFormat::Json);
        assert_eq!(CatalogFormat::from_path(Path::new("catalog")), CatalogFormat::Json);
    }

    #[tokio::test]
    async fn loads_json_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, JSON).unwrap();

        let doc = FileCatalogSource::new(&path).load().await.unwrap();

        assert_eq!(doc.store_name.as_deref(), Some("QuickMart"));
        assert_eq!(doc.categories[0].items[0].id, "bread-1");
    }

    #[tokio::test]
    async fn loads_yaml_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, YAML).unwrap();

        let doc = FileCatalogSource::new(&path).load().await.unwrap();

        assert_eq!(doc.categories[0].items[0].tags, vec!["spread"]);
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let source = FileCatalogSource::new(dir.path().join("nope.json"));

        let err = source.load().await.unwrap_err();

        assert!(matches!(err, CatalogError::Unavailable(_)));
    }

    #[tokio::test]
    async fn malformed_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let err = FileCatalogSource::new(&path).load().await.unwrap_err();

        assert!(err.to_string().contains("cannot parse"));
    }
}
