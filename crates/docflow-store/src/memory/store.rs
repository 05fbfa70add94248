//! The bundle of repositories a running application works against.

use std::sync::Arc;

use docflow_entity::catalog::SystemCatalog;
use docflow_entity::document::Document;
use docflow_entity::project::Project;
use docflow_entity::user::User;

use super::catalog::CatalogStore;
use super::event_log::MemoryEventLog;
use super::repository::MemoryRepository;
use crate::snapshot::Snapshot;

/// Every in-memory repository, plus the catalog and the event log.
///
/// The event log is carried in snapshots, so events published by one
/// process are still there when the next one loads the file.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Projects.
    pub projects: Arc<MemoryRepository<Project>>,
    /// Users.
    pub users: Arc<MemoryRepository<User>>,
    /// Documents, transmittals included.
    pub documents: Arc<MemoryRepository<Document>>,
    /// List-of-values catalog.
    pub catalog: CatalogStore,
    /// Published domain events.
    pub events: Arc<MemoryEventLog>,
}

impl MemoryStore {
    /// Create an empty store around `catalog`.
    pub fn new(catalog: SystemCatalog) -> Self {
        Self {
            catalog: CatalogStore::new(catalog),
            ..Self::default()
        }
    }

    /// Load a store from a snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            projects: Arc::new(MemoryRepository::with_entities(snapshot.projects)),
            users: Arc::new(MemoryRepository::with_entities(snapshot.users)),
            documents: Arc::new(MemoryRepository::with_entities(snapshot.documents)),
            catalog: CatalogStore::new(snapshot.catalog),
            events: Arc::new(MemoryEventLog::with_events(snapshot.events)),
        }
    }

    /// Capture the current state as a snapshot.
    ///
    /// Entities are ordered deterministically so that snapshot files diff
    /// cleanly: projects by code, users by email, documents by id. Events
    /// keep publication order.
    pub async fn to_snapshot(&self) -> Snapshot {
        let mut projects = self.projects.snapshot();
        projects.sort_by(|a, b| a.code.cmp(&b.code));
        let mut users = self.users.snapshot();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        let mut documents = self.documents.snapshot();
        documents.sort_by_key(|d| d.id);

        Snapshot {
            projects,
            users,
            documents,
            catalog: self.catalog.get().await,
            events: self.events.events().await,
        }
    }
}
