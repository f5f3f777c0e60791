//! Product catalog service: CRUD, paginated search and inventory
//! adjustment over a pluggable storage backend.

pub mod catalog;
pub mod config;
pub mod keys;
