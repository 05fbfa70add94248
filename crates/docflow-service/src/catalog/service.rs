//! List-of-values catalog maintenance.

use std::sync::Arc;

use tracing::info;

use docflow_auth::WorkflowEnforcer;
use docflow_core::error::AppError;
use docflow_entity::catalog::{CatalogKind, SystemCatalog};
use docflow_store::CatalogStore;

use crate::context::ActorContext;

/// Reads and edits the discipline, nature and issuer lists.
#[derive(Debug, Clone)]
pub struct CatalogService {
    /// Running catalog.
    catalog: CatalogStore,
    /// Role checks.
    enforcer: Arc<WorkflowEnforcer>,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(catalog: CatalogStore, enforcer: Arc<WorkflowEnforcer>) -> Self {
        Self { catalog, enforcer }
    }

    /// The current catalog. Readable by everyone.
    pub async fn get(&self) -> SystemCatalog {
        self.catalog.get().await
    }

    /// Append a value to one list.
    pub async fn add(
        &self,
        actor: &ActorContext,
        kind: CatalogKind,
        value: &str,
    ) -> Result<SystemCatalog, AppError> {
        self.enforcer.require_manager(&actor.roles, "edit the catalog")?;
        let mut catalog = self.catalog.get().await;
        catalog.add(kind, value)?;
        self.catalog.replace(catalog.clone()).await;
        info!(kind = %kind, value = %value.trim(), actor = %actor.user_id, "Catalog value added");
        Ok(catalog)
    }

    /// Remove a value from one list.
    pub async fn remove(
        &self,
        actor: &ActorContext,
        kind: CatalogKind,
        value: &str,
    ) -> Result<SystemCatalog, AppError> {
        self.enforcer.require_manager(&actor.roles, "edit the catalog")?;
        let mut catalog = self.catalog.get().await;
        catalog.remove(kind, value)?;
        self.catalog.replace(catalog.clone()).await;
        info!(kind = %kind, value = %value, actor = %actor.user_id, "Catalog value removed");
        Ok(catalog)
    }
}
