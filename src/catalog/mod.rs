//! Product catalog.

pub mod errors;
pub mod memory;
pub mod models;
pub mod service;
pub mod store;

pub use errors::{CatalogServiceError, StoreError};
pub use service::*;
