//! JSON snapshot persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use docflow_core::error::AppError;
use docflow_core::events::DomainEvent;
use docflow_core::result::AppResult;
use docflow_entity::catalog::SystemCatalog;
use docflow_entity::document::Document;
use docflow_entity::project::Project;
use docflow_entity::user::User;

/// Everything the store holds, as written to disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Projects.
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Users.
    #[serde(default)]
    pub users: Vec<User>,
    /// Documents, transmittals included.
    #[serde(default)]
    pub documents: Vec<Document>,
    /// List-of-values catalog.
    #[serde(default)]
    pub catalog: SystemCatalog,
    /// Published domain events, oldest first.
    #[serde(default)]
    pub events: Vec<DomainEvent>,
}

impl Snapshot {
    /// Read a snapshot file. Returns `None` when the file does not exist.
    pub async fn load(path: &Path) -> AppResult<Option<Self>> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No snapshot found");
                return Ok(None);
            }
            Err(e) => {
                return Err(AppError::storage(format!(
                    "Failed to read snapshot {}: {e}",
                    path.display()
                )));
            }
        };

        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
        debug!(
            path = %path.display(),
            documents = snapshot.documents.len(),
            "Loaded snapshot"
        );
        Ok(Some(snapshot))
    }

    /// Write the snapshot, replacing any existing file.
    ///
    /// The file is written next to its destination first and then renamed
    /// over it, so a failed write never leaves a truncated snapshot.
    pub async fn save(&self, path: &Path, pretty: bool) -> AppResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::storage(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let body = if pretty {
            serde_json::to_vec_pretty(self)?
        } else {
            serde_json::to_vec(self)?
        };

        let staging = path.with_extension("json.tmp");
        tokio::fs::write(&staging, body).await.map_err(|e| {
            AppError::storage(format!("Failed to write {}: {e}", staging.display()))
        })?;
        tokio::fs::rename(&staging, path).await.map_err(|e| {
            AppError::storage(format!("Failed to replace {}: {e}", path.display()))
        })?;

        info!(
            path = %path.display(),
            documents = self.documents.len(),
            "Snapshot saved"
        );
        Ok(())
    }
}
