//! Shared, mutable list-of-values catalog.

use std::sync::Arc;

use tokio::sync::RwLock;

use docflow_entity::catalog::SystemCatalog;

/// Holds the running catalog. Clones share the same catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    inner: Arc<RwLock<SystemCatalog>>,
}

impl CatalogStore {
    /// Create a store holding `catalog`.
    pub fn new(catalog: SystemCatalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(catalog)),
        }
    }

    /// Copy out the current catalog.
    pub async fn get(&self) -> SystemCatalog {
        self.inner.read().await.clone()
    }

    /// Replace the catalog.
    pub async fn replace(&self, catalog: SystemCatalog) {
        *self.inner.write().await = catalog;
    }
}
