//! Transition Engine: applies one workflow action to one document.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use docflow_auth::WorkflowEnforcer;
use docflow_core::config::workflow::WorkflowConfig;
use docflow_core::error::AppError;
use docflow_entity::document::{
    Attachment, Document, DocumentVersion, Qualification, VersionEntryKind, WorkflowStatus,
};

use crate::context::ActorContext;

/// A workflow action requested on a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRequest {
    /// Target status.
    pub status: WorkflowStatus,
    /// Target qualification.
    pub qualification: Qualification,
    /// Mandatory comment.
    pub comment: String,
    /// Optional attachment.
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

/// Result of a committed transition.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    /// The updated document.
    pub document: Document,
    /// The record prepended to its history.
    pub record: DocumentVersion,
    /// Status before the transition.
    pub previous_status: WorkflowStatus,
    /// Whether the document just entered client analysis, which calls for
    /// a transmittal.
    pub triggers_transmittal: bool,
}

/// Applies single-document workflow transitions.
#[derive(Debug, Clone)]
pub struct TransitionEngine {
    /// Workflow rule enforcer.
    enforcer: Arc<WorkflowEnforcer>,
    /// Markers and defaults.
    config: Arc<WorkflowConfig>,
}

impl TransitionEngine {
    /// Creates a new transition engine.
    pub fn new(enforcer: Arc<WorkflowEnforcer>, config: Arc<WorkflowConfig>) -> Self {
        Self { enforcer, config }
    }

    /// Returns the workflow configuration.
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// Returns the enforcer.
    pub fn enforcer(&self) -> &WorkflowEnforcer {
        &self.enforcer
    }

    /// Validates and applies `request` to `doc`.
    ///
    /// Legality is re-derived from the rule table; the comment must not be
    /// blank. On failure `doc` is untouched and nothing is returned.
    pub fn apply(
        &self,
        doc: &Document,
        request: &TransitionRequest,
        actor: &ActorContext,
        at: DateTime<Utc>,
    ) -> Result<TransitionOutcome, AppError> {
        self.enforcer.require_transition(
            &actor.roles,
            doc,
            request.status,
            request.qualification,
        )?;
        if request.comment.trim().is_empty() {
            return Err(AppError::validation(
                "A comment is required to confirm a workflow action",
            ));
        }

        Ok(self.commit(
            doc,
            request.status,
            request.qualification,
            &request.comment,
            request.attachment.as_ref(),
            actor,
            at,
        ))
    }

    /// The per-document update shared by the single and batch paths.
    ///
    /// Assumes the action has already been authorized.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn commit(
        &self,
        doc: &Document,
        status: WorkflowStatus,
        qualification: Qualification,
        comment: &str,
        attachment: Option<&Attachment>,
        actor: &ActorContext,
        at: DateTime<Utc>,
    ) -> TransitionOutcome {
        let previous_status = doc.current_status;
        let at = at.max(doc.last_modified);

        let record = DocumentVersion {
            version: doc.current_version.clone(),
            status,
            qualification,
            updated_at: at,
            updated_by: actor.name.clone(),
            updated_by_role: Some(actor.primary_role()),
            comments: annotate(&self.config, comment, attachment),
            attachment_name: attachment.map(|a| a.name().to_string()),
            file_url: None,
            kind: VersionEntryKind::Transition,
        };

        let mut document = doc.clone();
        document.current_status = status;
        document.current_qualification = qualification;
        document.is_locked = document.is_transmittal() || status == WorkflowStatus::AnalysisClient;
        document.last_modified = at;
        document.push_version(record.clone());

        let triggers_transmittal = status == WorkflowStatus::AnalysisClient
            && previous_status != WorkflowStatus::AnalysisClient;

        info!(
            document_id = %document.id,
            code = %document.code,
            from = %previous_status,
            to = %status,
            qualification = %qualification,
            actor = %actor.user_id,
            "Transition applied"
        );

        TransitionOutcome {
            document,
            record,
            previous_status,
            triggers_transmittal,
        }
    }
}

/// Append the attachment marker to a comment.
pub(crate) fn annotate(
    config: &WorkflowConfig,
    comment: &str,
    attachment: Option<&Attachment>,
) -> String {
    match attachment {
        None => comment.to_string(),
        Some(Attachment::Upload(_)) => format!("{comment} {}", config.new_attachment_marker),
        Some(Attachment::Forwarded(name)) => {
            format!("{comment} [{} {name}]", config.forwarded_attachment_marker)
        }
    }
}
