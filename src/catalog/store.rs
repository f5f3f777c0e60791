//! Catalog storage interface.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    catalog::{
        errors::StoreError,
        models::{Product, ProductDraft, ProductFilter},
    },
    keys::ProductKey,
};

/// Durable keyed storage for products.
///
/// Implementations enforce SKU uniqueness at write time and perform
/// versioned compare-and-swap updates, so racing writers cannot commit
/// conflicting state. Call timeouts are the implementation's concern.
#[automock]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn find_by_key(&self, key: ProductKey) -> Result<Option<Product>, StoreError>;

    async fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, StoreError>;

    async fn exists_by_sku(&self, sku: &str) -> Result<bool, StoreError>;

    /// Inserts a new record, assigning the next key and version 1.
    async fn insert(
        &self,
        draft: ProductDraft,
        created_at: Timestamp,
    ) -> Result<Product, StoreError>;

    /// Replaces the stored record if `product.version` still matches,
    /// bumping the version on success.
    async fn update(&self, product: Product) -> Result<Product, StoreError>;

    /// Removes the record; returns whether anything was deleted.
    async fn delete_by_key(&self, key: ProductKey) -> Result<bool, StoreError>;

    /// One filtered page sorted by creation time, newest first, plus the
    /// total match count over the full filtered set.
    async fn search(
        &self,
        filter: ProductFilter,
        offset: u64,
        limit: u32,
    ) -> Result<(Vec<Product>, u64), StoreError>;
}
