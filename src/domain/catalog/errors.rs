//! Catalog error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised while loading or indexing a catalog.
///
/// None of these are fatal: a failed load degrades to an empty catalog and
/// a bad entry is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog source is missing or unreadable.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// One entry failed validation and was skipped.
    #[error("Catalog entry '{id}' skipped: {reason}")]
    InvalidEntry { id: String, reason: String },

    /// An entry reused an id already present in the catalog.
    #[error("Duplicate catalog id '{0}' skipped")]
    DuplicateId(String),
}

impl CatalogError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        CatalogError::Unavailable(reason.into())
    }

    pub fn invalid_entry(id: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::InvalidEntry {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::Unavailable(_) => ErrorCode::CatalogUnavailable,
            CatalogError::InvalidEntry { .. } => ErrorCode::InvalidFormat,
            CatalogError::DuplicateId(_) => ErrorCode::ValidationFailed,
        }
    }
}

impl From<CatalogError> for DomainError {
    fn from(err: CatalogError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_maps_to_catalog_unavailable_code() {
        let err = CatalogError::unavailable("catalog.json not found");
        assert_eq!(err.code(), ErrorCode::CatalogUnavailable);
        assert!(err.to_string().contains("catalog.json not found"));
    }

    #[test]
    fn invalid_entry_names_the_item() {
        let err = CatalogError::invalid_entry("pb-1", "negative price");
        assert_eq!(err.to_string(), "Catalog entry 'pb-1' skipped: negative price");
    }
}
