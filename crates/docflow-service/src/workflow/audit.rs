//! Metadata Diff & Audit.
//!
//! Field edits are compared through the typed comparator table in
//! [`MetadataField`]; only real changes are written, and they are logged
//! as a history entry that leaves status, qualification and label alone.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use docflow_core::config::workflow::WorkflowConfig;
use docflow_core::error::AppError;
use docflow_entity::document::{
    Document, DocumentVersion, FieldUpdate, MetadataField, VersionEntryKind,
};

use crate::context::ActorContext;

/// One changed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    /// The field.
    pub field: MetadataField,
    /// Rendered value before the edit.
    pub old: String,
    /// Rendered value after the edit.
    pub new: String,
}

impl FieldChange {
    /// Changelog entry: `field: "old" -> "new"`.
    pub fn render(&self) -> String {
        format!("{}: \"{}\" -> \"{}\"", self.field, self.old, self.new)
    }
}

/// Result of a metadata update.
#[derive(Debug, Clone)]
pub enum MetadataOutcome {
    /// Every proposed value equalled the current one.
    Unchanged,
    /// At least one field changed.
    Updated {
        /// The updated document.
        document: Document,
        /// The audit record prepended to its history.
        record: DocumentVersion,
        /// The fields that changed, in request order.
        changes: Vec<FieldChange>,
    },
}

impl MetadataOutcome {
    /// Whether anything changed.
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Diffs and applies partial metadata updates.
#[derive(Debug, Clone)]
pub struct MetadataAuditor {
    /// Placeholder text and other defaults.
    config: Arc<WorkflowConfig>,
}

impl MetadataAuditor {
    /// Creates a new auditor.
    pub fn new(config: Arc<WorkflowConfig>) -> Self {
        Self { config }
    }

    /// Field-level differences between `doc` and `updates`.
    ///
    /// Fails on a blank required field or a field listed twice.
    pub fn diff(&self, doc: &Document, updates: &[FieldUpdate]) -> Result<Vec<FieldChange>, AppError> {
        let mut seen = HashSet::new();
        let mut changes = Vec::new();
        let placeholder = &self.config.empty_value_placeholder;

        for update in updates {
            update.validate()?;
            let field = update.field();
            if !seen.insert(field) {
                return Err(AppError::validation(format!(
                    "Field '{field}' is listed more than once"
                )));
            }

            let old = field.read(doc);
            let new = update.value();
            if old != new {
                changes.push(FieldChange {
                    field,
                    old: old.render(placeholder),
                    new: new.render(placeholder),
                });
            }
        }
        Ok(changes)
    }

    /// Apply `updates` to `doc`.
    ///
    /// When nothing differs the document is left exactly as it was: no
    /// record, no `last_modified` bump.
    pub fn apply(
        &self,
        doc: &Document,
        updates: &[FieldUpdate],
        actor: &ActorContext,
        at: DateTime<Utc>,
    ) -> Result<MetadataOutcome, AppError> {
        let changes = self.diff(doc, updates)?;
        if changes.is_empty() {
            debug!(document_id = %doc.id, "Metadata update is a no-op");
            return Ok(MetadataOutcome::Unchanged);
        }

        let at = at.max(doc.last_modified);
        let changelog: Vec<String> = changes.iter().map(FieldChange::render).collect();
        let record = DocumentVersion {
            version: doc.current_version.clone(),
            status: doc.current_status,
            qualification: doc.current_qualification,
            updated_at: at,
            updated_by: actor.name.clone(),
            updated_by_role: Some(actor.primary_role()),
            comments: changelog.join("; "),
            attachment_name: None,
            file_url: None,
            kind: VersionEntryKind::MetadataUpdate,
        };

        let mut document = doc.clone();
        let changed: HashSet<MetadataField> = changes.iter().map(|c| c.field).collect();
        for update in updates.iter().filter(|u| changed.contains(&u.field())) {
            update.apply_to(&mut document);
        }
        document.last_modified = at;
        document.push_version(record.clone());

        info!(
            document_id = %document.id,
            fields = changes.len(),
            actor = %actor.user_id,
            "Metadata updated"
        );

        Ok(MetadataOutcome::Updated {
            document,
            record,
            changes,
        })
    }
}
