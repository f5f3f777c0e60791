//! Product Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct};

use crate::keys::ProductKey;

/// Product Model
///
/// `version` is the optimistic-concurrency token checked by
/// [`CatalogStore::update`](crate::catalog::store::CatalogStore::update);
/// it is internal and withheld from the serialized form. Stock
/// availability is derived via [`Product::in_stock`] rather than stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub key: ProductKey,
    pub version: u64,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub currency: String,
    pub amount: u64,
    pub quantity: u32,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    /// Stock is on hand whenever any quantity remains.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Replaces every caller-mutable field with the draft's values.
    pub fn apply_draft(&mut self, draft: ProductDraft) {
        self.sku = draft.sku;
        self.name = draft.name;
        self.description = draft.description;
        self.currency = draft.currency;
        self.amount = draft.amount;
        self.quantity = draft.quantity;
        self.category = draft.category;
        self.tags = draft.tags;
    }
}

impl Serialize for Product {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Product", 12)?;
        state.serialize_field("id", &self.key.to_string())?;
        state.serialize_field("sku", &self.sku)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("currency", &self.currency)?;
        state.serialize_field("amount", &self.amount)?;
        state.serialize_field("quantity", &self.quantity)?;
        state.serialize_field("inStock", &self.in_stock())?;
        state.serialize_field("category", &self.category)?;
        state.serialize_field("tags", &self.tags)?;
        state.serialize_field("createdAt", &self.created_at)?;
        state.serialize_field("updatedAt", &self.updated_at)?;
        state.end()
    }
}

/// Caller input for create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub currency: String,
    pub amount: u64,
    pub quantity: u32,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Paging and filter parameters for a product listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRequest {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub query: Option<String>,
    pub category: Option<String>,
}

/// Store-side search constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub query: Option<String>,
    pub category: Option<String>,
}

/// One bounded slice of the filtered, sorted product set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u64,
}
