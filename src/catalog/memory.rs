//! In-memory catalog store.

use async_trait::async_trait;
use jiff::Timestamp;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{
    catalog::{
        errors::StoreError,
        models::{Product, ProductDraft, ProductFilter},
        store::CatalogStore,
    },
    keys::ProductKey,
};

/// Versioned in-memory [`CatalogStore`].
///
/// Every write takes the state lock for its full read-check-write span, so
/// each store call is atomic. Keys come from a monotonic counter that is
/// never decremented, so a deleted key is never reassigned.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    products: FxHashMap<u64, Product>,
    sku_index: FxHashMap<String, u64>,
    last_key: u64,
}

impl MemoryCatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(product: &Product, filter: &ProductFilter) -> bool {
    let query_matches = filter.query.as_deref().is_none_or(|query| {
        let needle = query.to_lowercase();

        product.name.to_lowercase().contains(&needle)
            || product
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(&needle))
            || product.sku.to_lowercase().contains(&needle)
    });

    let category_matches = filter
        .category
        .as_deref()
        .is_none_or(|category| product.category.as_deref() == Some(category));

    query_matches && category_matches
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn find_by_key(&self, key: ProductKey) -> Result<Option<Product>, StoreError> {
        Ok(self.state.read().products.get(&key.get()).cloned())
    }

    async fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, StoreError> {
        let state = self.state.read();

        Ok(state
            .sku_index
            .get(sku)
            .and_then(|key| state.products.get(key))
            .cloned())
    }

    async fn exists_by_sku(&self, sku: &str) -> Result<bool, StoreError> {
        Ok(self.state.read().sku_index.contains_key(sku))
    }

    async fn insert(
        &self,
        draft: ProductDraft,
        created_at: Timestamp,
    ) -> Result<Product, StoreError> {
        let mut state = self.state.write();

        if state.sku_index.contains_key(&draft.sku) {
            return Err(StoreError::DuplicateSku { sku: draft.sku });
        }

        state.last_key += 1;
        let key = state.last_key;

        let product = Product {
            key: ProductKey::new(key),
            version: 1,
            sku: draft.sku,
            name: draft.name,
            description: draft.description,
            currency: draft.currency,
            amount: draft.amount,
            quantity: draft.quantity,
            category: draft.category,
            tags: draft.tags,
            created_at,
            updated_at: created_at,
        };

        state.sku_index.insert(product.sku.clone(), key);
        state.products.insert(key, product.clone());

        Ok(product)
    }

    async fn update(&self, product: Product) -> Result<Product, StoreError> {
        let mut state = self.state.write();
        let key = product.key.get();

        // A missing record means a concurrent delete; surface it the same
        // way as a stale version so the caller re-reads.
        let current = state.products.get(&key).ok_or(StoreError::Conflict)?;

        if current.version != product.version {
            return Err(StoreError::Conflict);
        }

        if let Some(&owner) = state.sku_index.get(&product.sku) {
            if owner != key {
                return Err(StoreError::DuplicateSku { sku: product.sku });
            }
        }

        let previous_sku = current.sku.clone();

        let mut stored = product;
        stored.version += 1;

        if stored.sku != previous_sku {
            state.sku_index.remove(&previous_sku);
            state.sku_index.insert(stored.sku.clone(), key);
        }

        state.products.insert(key, stored.clone());

        Ok(stored)
    }

    async fn delete_by_key(&self, key: ProductKey) -> Result<bool, StoreError> {
        let mut state = self.state.write();

        match state.products.remove(&key.get()) {
            Some(product) => {
                state.sku_index.remove(&product.sku);

                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn search(
        &self,
        filter: ProductFilter,
        offset: u64,
        limit: u32,
    ) -> Result<(Vec<Product>, u64), StoreError> {
        let state = self.state.read();

        let mut matched: Vec<&Product> = state
            .products
            .values()
            .filter(|product| matches(product, &filter))
            .collect();

        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.key.cmp(&a.key))
        });

        let total = matched.len() as u64;

        let items = matched
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok((items, total))
    }
}
