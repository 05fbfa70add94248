//! Transmittal (GRD) Generator.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use docflow_core::config::transmittal::TransmittalConfig;
use docflow_core::error::AppError;
use docflow_core::types::{DocumentId, ProjectId};
use docflow_entity::document::{
    Document, DocumentType, DocumentVersion, Qualification, VersionEntryKind, WorkflowStatus,
};
use docflow_entity::user::UserRole;

use crate::context::ActorContext;

/// Supplies candidate transmittal codes.
pub trait CodeSource: Send + Sync + fmt::Debug {
    /// Produce the next candidate code under `prefix`.
    fn next_code(&self, prefix: &str) -> String;
}

/// Draws codes from random UUIDs: `GRD-1A2B3C4D`.
#[derive(Debug, Clone, Default)]
pub struct UuidCodeSource;

impl CodeSource for UuidCodeSource {
    fn next_code(&self, prefix: &str) -> String {
        let hex = Uuid::new_v4().simple().to_string().to_uppercase();
        format!("{prefix}-{}", &hex[..8])
    }
}

/// Numbers codes sequentially: `GRD-0001`, `GRD-0002`, ...
#[derive(Debug, Default)]
pub struct SequentialCodeSource {
    next: AtomicU32,
}

impl SequentialCodeSource {
    /// Start counting after `last`.
    pub fn starting_after(last: u32) -> Self {
        Self {
            next: AtomicU32::new(last),
        }
    }
}

impl CodeSource for SequentialCodeSource {
    fn next_code(&self, prefix: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{prefix}-{n:04}")
    }
}

/// Synthesizes transmittal documents for documents sent to the client.
#[derive(Debug, Clone)]
pub struct TransmittalGenerator {
    /// Naming and actor settings.
    config: Arc<TransmittalConfig>,
    /// Code supplier.
    codes: Arc<dyn CodeSource>,
}

impl TransmittalGenerator {
    /// Creates a generator with random codes.
    pub fn new(config: Arc<TransmittalConfig>) -> Self {
        Self::with_code_source(config, Arc::new(UuidCodeSource))
    }

    /// Creates a generator with a custom code source.
    pub fn with_code_source(config: Arc<TransmittalConfig>, codes: Arc<dyn CodeSource>) -> Self {
        Self { config, codes }
    }

    /// Build a transmittal covering `related`, in order.
    ///
    /// The code is drawn from the code source, skipping values listed in
    /// `taken`; after `max_code_attempts` collisions the call fails with
    /// `Conflict`.
    pub fn generate(
        &self,
        related: &[Document],
        actor: &ActorContext,
        project_id: ProjectId,
        taken: &HashSet<String>,
        at: DateTime<Utc>,
    ) -> Result<Document, AppError> {
        if related.is_empty() {
            return Err(AppError::validation(
                "A transmittal must cover at least one document",
            ));
        }

        let code = self.draw_code(taken)?;
        let codes: Vec<&str> = related.iter().map(|d| d.code.as_str()).collect();
        let title = format!("{} - {}", self.config.title_prefix, codes.join(", "));
        let version = DocumentType::Transmittal.initial_version();

        let seed = DocumentVersion {
            version: version.clone(),
            status: WorkflowStatus::AnalysisClient,
            qualification: Qualification::None,
            updated_at: at,
            updated_by: self.config.system_actor_name.clone(),
            updated_by_role: Some(UserRole::Admin),
            comments: self.config.generation_comment.clone(),
            attachment_name: None,
            file_url: None,
            kind: VersionEntryKind::Generated,
        };

        let transmittal = Document {
            id: DocumentId::new(),
            project_id,
            code,
            title,
            doc_type: DocumentType::Transmittal,
            discipline: self.config.discipline.clone(),
            nature: self.config.nature.clone(),
            issuer: actor.name.clone(),
            current_version: version,
            current_status: WorkflowStatus::AnalysisClient,
            current_qualification: Qualification::None,
            is_locked: true,
            versions: vec![seed],
            last_modified: at,
            forecast_date: None,
            informative: false,
            as_built: false,
            taf_tac: None,
            ge_code: None,
            access_code: None,
        };

        info!(
            transmittal_id = %transmittal.id,
            code = %transmittal.code,
            related = related.len(),
            "Transmittal generated"
        );
        Ok(transmittal)
    }

    fn draw_code(&self, taken: &HashSet<String>) -> Result<String, AppError> {
        for attempt in 1..=self.config.max_code_attempts {
            let candidate = self.codes.next_code(&self.config.code_prefix);
            if !taken.contains(&candidate) {
                return Ok(candidate);
            }
            warn!(code = %candidate, attempt, "Transmittal code already in use");
        }
        Err(AppError::conflict(format!(
            "No free transmittal code after {} attempts",
            self.config.max_code_attempts
        )))
    }
}
