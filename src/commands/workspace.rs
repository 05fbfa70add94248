//! Snapshot-backed store and services shared by every command.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use docflow_auth::WorkflowEnforcer;
use docflow_core::config::AppConfig;
use docflow_core::error::AppError;
use docflow_core::types::{DocumentId, ProjectId};
use docflow_entity::document::DocumentFilter;
use docflow_service::{
    ActorContext, AdminService, CatalogService, DashboardService, DocumentService,
};
use docflow_store::{MemoryStore, Snapshot};

/// The loaded store plus the services wired on top of it.
pub struct Workspace {
    /// In-memory store loaded from the snapshot.
    pub store: MemoryStore,
    /// Document operations.
    pub documents: DocumentService,
    /// Projects and users.
    pub admin: AdminService,
    /// Catalog maintenance.
    pub catalog: CatalogService,
    /// Dashboard.
    pub dashboard: DashboardService,
    /// Where the snapshot lives.
    snapshot_path: PathBuf,
    /// Pretty-print on save.
    pretty: bool,
}

/// Resolve the snapshot path from the flag or the configuration.
pub fn snapshot_path(config: &AppConfig, overridden: Option<&str>) -> PathBuf {
    PathBuf::from(overridden.unwrap_or(config.store.snapshot_path.as_str()))
}

impl Workspace {
    /// Load the snapshot and wire the services.
    pub async fn open(config: &AppConfig, snapshot: Option<&str>) -> Result<Self, AppError> {
        let path = snapshot_path(config, snapshot);
        let loaded = Snapshot::load(&path).await?.ok_or_else(|| {
            AppError::not_found(format!(
                "No snapshot at {}; run `docflow init` first",
                path.display()
            ))
        })?;
        let store = MemoryStore::from_snapshot(loaded);
        debug!(path = %path.display(), "Workspace opened");

        let enforcer = Arc::new(WorkflowEnforcer::new());
        let workflow = Arc::new(config.workflow.clone());
        let documents = DocumentService::new(
            store.documents.clone(),
            store.projects.clone(),
            store.catalog.clone(),
            store.events.clone(),
            Arc::clone(&enforcer),
            Arc::clone(&workflow),
            Arc::new(config.transmittal.clone()),
        );
        let admin = AdminService::new(
            store.projects.clone(),
            store.users.clone(),
            Arc::clone(&enforcer),
        );
        let catalog = CatalogService::new(store.catalog.clone(), enforcer);
        let dashboard = DashboardService::new(store.documents.clone(), workflow);

        Ok(Self {
            store,
            documents,
            admin,
            catalog,
            dashboard,
            snapshot_path: path,
            pretty: config.store.pretty,
        })
    }

    /// The acting user, looked up by email.
    pub async fn actor(&self, email: &str) -> Result<ActorContext, AppError> {
        let user = self.admin.find_user_by_email(email).await?;
        Ok(ActorContext::from_user(&user))
    }

    /// Write the store back to the snapshot file.
    pub async fn persist(&self) -> Result<(), AppError> {
        self.store
            .to_snapshot()
            .await
            .save(&self.snapshot_path, self.pretty)
            .await
    }

    /// Resolve a document reference: its id, or a code that matches exactly
    /// one document in the actor's scope.
    pub async fn resolve_document(
        &self,
        actor: &ActorContext,
        reference: &str,
    ) -> Result<DocumentId, AppError> {
        if let Ok(id) = reference.parse::<DocumentId>() {
            return Ok(id);
        }
        let docs = self.documents.list(actor, &DocumentFilter::default()).await?;
        let mut matches = docs
            .iter()
            .filter(|d| d.code.eq_ignore_ascii_case(reference.trim()));
        match (matches.next(), matches.next()) {
            (Some(doc), None) => Ok(doc.id),
            (None, _) => Err(AppError::not_found(format!(
                "No document with code '{reference}'"
            ))),
            (Some(_), Some(_)) => Err(AppError::validation(format!(
                "Code '{reference}' matches several documents; use the document id"
            ))),
        }
    }

    /// Resolve a project reference: its id or its code.
    pub async fn resolve_project(
        &self,
        actor: &ActorContext,
        reference: &str,
    ) -> Result<ProjectId, AppError> {
        if let Ok(id) = reference.parse::<ProjectId>() {
            return Ok(id);
        }
        self.admin
            .list_projects(actor)
            .await?
            .into_iter()
            .find(|p| p.code.eq_ignore_ascii_case(reference.trim()))
            .map(|p| p.id)
            .ok_or_else(|| AppError::not_found(format!("No project with code '{reference}'")))
    }
}
