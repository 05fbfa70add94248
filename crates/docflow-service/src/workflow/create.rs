//! Document registration.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use validator::Validate;

use docflow_core::config::workflow::WorkflowConfig;
use docflow_core::error::AppError;
use docflow_core::types::{DocumentId, ProjectId};
use docflow_entity::catalog::{CatalogKind, SystemCatalog};
use docflow_entity::document::{
    Document, DocumentType, DocumentVersion, NewDocument, Qualification, VersionEntryKind,
    WorkflowStatus,
};

use crate::context::ActorContext;

/// Builds freshly registered documents.
#[derive(Debug, Clone)]
pub struct DocumentFactory {
    config: Arc<WorkflowConfig>,
}

impl DocumentFactory {
    /// Creates a new factory.
    pub fn new(config: Arc<WorkflowConfig>) -> Self {
        Self { config }
    }

    /// Build a new document in DRAFT from `payload`.
    ///
    /// Transmittals are rejected: they only come out of the generator.
    pub fn create(
        &self,
        payload: NewDocument,
        project_id: ProjectId,
        actor: &ActorContext,
        catalog: &SystemCatalog,
        at: DateTime<Utc>,
    ) -> Result<Document, AppError> {
        payload.validate()?;
        if payload.doc_type == DocumentType::Transmittal {
            return Err(AppError::validation(
                "Transmittals are generated automatically and cannot be registered",
            ));
        }

        let discipline = payload.discipline.trim().to_string();
        let nature = payload.nature.trim().to_string();
        let issuer = payload.issuer.trim().to_string();
        if self.config.enforce_catalog {
            require_catalogued(catalog, CatalogKind::Discipline, &discipline)?;
            require_catalogued(catalog, CatalogKind::Nature, &nature)?;
            require_catalogued(catalog, CatalogKind::Issuer, &issuer)?;
        }

        let version = payload.doc_type.initial_version();
        let file_name = normalize(payload.file_name);
        let seed = DocumentVersion {
            version: version.clone(),
            status: WorkflowStatus::Draft,
            qualification: Qualification::None,
            updated_at: at,
            updated_by: actor.name.clone(),
            updated_by_role: Some(actor.primary_role()),
            comments: self.config.creation_comment.clone(),
            attachment_name: file_name,
            file_url: None,
            kind: VersionEntryKind::Created,
        };

        let document = Document {
            id: DocumentId::new(),
            project_id,
            code: payload.code.trim().to_string(),
            title: payload.title.trim().to_string(),
            doc_type: payload.doc_type,
            discipline,
            nature,
            issuer,
            current_version: version,
            current_status: WorkflowStatus::Draft,
            current_qualification: Qualification::None,
            is_locked: false,
            versions: vec![seed],
            last_modified: at,
            forecast_date: payload.forecast_date,
            informative: payload.informative,
            as_built: payload.as_built,
            taf_tac: normalize(payload.taf_tac),
            ge_code: normalize(payload.ge_code),
            access_code: normalize(payload.access_code),
        };

        info!(
            document_id = %document.id,
            code = %document.code,
            doc_type = %document.doc_type,
            actor = %actor.user_id,
            "Document created"
        );
        Ok(document)
    }
}

/// Fails with `Validation` unless `value` is listed in the catalog.
pub(crate) fn require_catalogued(
    catalog: &SystemCatalog,
    kind: CatalogKind,
    value: &str,
) -> Result<(), AppError> {
    if catalog.contains(kind, value) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "'{value}' is not a listed {kind}"
        )))
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
