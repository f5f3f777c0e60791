//! Catalog service.

use std::{fmt, str::FromStr, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info, warn};

use crate::{
    catalog::{
        errors::{CatalogServiceError, StoreError},
        models::{PageRequest, Product, ProductDraft, ProductFilter, ProductPage},
        store::CatalogStore,
    },
    config::PaginationConfig,
    keys::ProductKey,
};

/// Attempts per versioned write before the conflict is surfaced.
const MAX_CONFLICT_RETRIES: u32 = 3;

/// Maps a store failure into a service error, attaching the operation
/// name for context. Uniqueness violations keep their own variant.
fn storage(operation: &'static str) -> impl FnOnce(StoreError) -> CatalogServiceError {
    move |source| match source {
        StoreError::DuplicateSku { sku } => CatalogServiceError::DuplicateSku { sku },
        source => CatalogServiceError::Storage { operation, source },
    }
}

#[derive(Clone)]
pub struct StoreCatalogService {
    store: Arc<dyn CatalogStore>,
    pagination: PaginationConfig,
}

impl StoreCatalogService {
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>, pagination: PaginationConfig) -> Self {
        Self { store, pagination }
    }
}

impl fmt::Debug for StoreCatalogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreCatalogService")
            .field("pagination", &self.pagination)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CatalogService for StoreCatalogService {
    async fn list_products(
        &self,
        request: PageRequest,
    ) -> Result<ProductPage, CatalogServiceError> {
        debug!(?request, "listing products");

        // Out-of-range paging values are normalized, never rejected.
        let page = request.page.filter(|page| *page > 0).unwrap_or(1);
        let page_size = request
            .page_size
            .filter(|size| *size > 0)
            .map_or(self.pagination.default_page_size(), |size| {
                size.min(self.pagination.max_page_size())
            });
        let offset = u64::from(page - 1) * u64::from(page_size);

        let filter = ProductFilter {
            query: request.query,
            category: request.category,
        };

        let (items, total_items) = self
            .store
            .search(filter, offset, page_size)
            .await
            .map_err(storage("list_products"))?;

        Ok(ProductPage {
            items,
            page,
            page_size,
            total_items,
            total_pages: total_items.div_ceil(u64::from(page_size)),
        })
    }

    async fn get_product(&self, id: &str) -> Result<Product, CatalogServiceError> {
        let key = ProductKey::from_str(id)?;

        self.store
            .find_by_key(key)
            .await
            .map_err(storage("get_product"))?
            .ok_or(CatalogServiceError::NotFound)
    }

    async fn create_product(&self, draft: ProductDraft) -> Result<Product, CatalogServiceError> {
        debug!(sku = %draft.sku, "creating product");

        if self
            .store
            .exists_by_sku(&draft.sku)
            .await
            .map_err(storage("create_product"))?
        {
            return Err(CatalogServiceError::DuplicateSku { sku: draft.sku });
        }

        let created = self
            .store
            .insert(draft, Timestamp::now())
            .await
            .map_err(storage("create_product"))?;

        info!(key = %created.key, sku = %created.sku, "created product");

        Ok(created)
    }

    async fn update_product(
        &self,
        id: &str,
        draft: ProductDraft,
    ) -> Result<Product, CatalogServiceError> {
        let key = ProductKey::from_str(id)?;

        debug!(%key, "updating product");

        for _ in 0..MAX_CONFLICT_RETRIES {
            let existing = self
                .store
                .find_by_key(key)
                .await
                .map_err(storage("update_product"))?
                .ok_or(CatalogServiceError::NotFound)?;

            // Re-check uniqueness only when the SKU actually changes, so a
            // record may always keep its own SKU.
            if draft.sku != existing.sku
                && self
                    .store
                    .exists_by_sku(&draft.sku)
                    .await
                    .map_err(storage("update_product"))?
            {
                return Err(CatalogServiceError::DuplicateSku {
                    sku: draft.sku.clone(),
                });
            }

            let mut updated = existing;
            updated.apply_draft(draft.clone());
            updated.updated_at = Timestamp::now();

            match self.store.update(updated).await {
                Ok(stored) => {
                    info!(%key, "updated product");

                    return Ok(stored);
                }
                Err(StoreError::Conflict) => warn!(%key, "update conflict, retrying"),
                Err(source) => return Err(storage("update_product")(source)),
            }
        }

        Err(CatalogServiceError::Storage {
            operation: "update_product",
            source: StoreError::Conflict,
        })
    }

    async fn delete_product(&self, id: &str) -> Result<(), CatalogServiceError> {
        let key = ProductKey::from_str(id)?;

        let deleted = self
            .store
            .delete_by_key(key)
            .await
            .map_err(storage("delete_product"))?;

        if !deleted {
            return Err(CatalogServiceError::NotFound);
        }

        info!(%key, "deleted product");

        Ok(())
    }

    async fn decrement_inventory(
        &self,
        key: ProductKey,
        quantity: u32,
    ) -> Result<bool, CatalogServiceError> {
        debug!(%key, quantity, "decrementing inventory");

        for _ in 0..MAX_CONFLICT_RETRIES {
            let product = self
                .store
                .find_by_key(key)
                .await
                .map_err(storage("decrement_inventory"))?
                .ok_or(CatalogServiceError::NotFound)?;

            if product.quantity < quantity {
                warn!(
                    %key,
                    available = product.quantity,
                    requested = quantity,
                    "insufficient stock"
                );

                return Ok(false);
            }

            let mut adjusted = product;
            adjusted.quantity -= quantity;
            adjusted.updated_at = Timestamp::now();

            match self.store.update(adjusted).await {
                Ok(stored) => {
                    info!(%key, remaining = stored.quantity, "decremented inventory");

                    return Ok(true);
                }
                Err(StoreError::Conflict) => warn!(%key, "inventory conflict, retrying"),
                Err(source) => return Err(storage("decrement_inventory")(source)),
            }
        }

        Err(CatalogServiceError::Storage {
            operation: "decrement_inventory",
            source: StoreError::Conflict,
        })
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Returns one page of products matching the optional filters.
    async fn list_products(&self, request: PageRequest)
    -> Result<ProductPage, CatalogServiceError>;

    /// Retrieves a single product by its external identifier.
    async fn get_product(&self, id: &str) -> Result<Product, CatalogServiceError>;

    /// Creates a product, enforcing SKU uniqueness.
    async fn create_product(&self, draft: ProductDraft) -> Result<Product, CatalogServiceError>;

    /// Replaces every mutable field of an existing product.
    async fn update_product(
        &self,
        id: &str,
        draft: ProductDraft,
    ) -> Result<Product, CatalogServiceError>;

    /// Permanently removes a product.
    async fn delete_product(&self, id: &str) -> Result<(), CatalogServiceError>;

    /// Removes `quantity` units of stock; `Ok(false)` when not enough is
    /// on hand.
    async fn decrement_inventory(
        &self,
        key: ProductKey,
        quantity: u32,
    ) -> Result<bool, CatalogServiceError>;
}
