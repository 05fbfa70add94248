//! Catalog maintenance.

pub mod service;

pub use service::CatalogService;
