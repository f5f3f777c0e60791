//! Catalog service errors.

use thiserror::Error;

use crate::keys::ParseProductKeyError;

/// Failures surfaced by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A versioned update lost its compare-and-swap race; retryable.
    #[error("record version conflict")]
    Conflict,

    /// An insert or update would violate SKU uniqueness.
    #[error("SKU {sku:?} already exists")]
    DuplicateSku { sku: String },

    /// Transient backend failure.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("invalid product identifier")]
    InvalidIdentifier(#[from] ParseProductKeyError),

    #[error("product not found")]
    NotFound,

    #[error("product with SKU {sku:?} already exists")]
    DuplicateSku { sku: String },

    #[error("storage failure during {operation}")]
    Storage {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}
