//! Version re-issue: assigning a new revision label.
//!
//! Re-issue is separate from status transitions. Status, qualification
//! and the lock are carried over unchanged.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use docflow_auth::WorkflowEnforcer;
use docflow_core::config::workflow::WorkflowConfig;
use docflow_core::error::AppError;
use docflow_entity::document::{
    Attachment, Document, DocumentVersion, VersionEntryKind, VersionLabel,
};

use crate::context::ActorContext;

use super::transition::annotate;

/// Request to issue a new revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReissueRequest {
    /// Explicit label; the successor of the current label when absent.
    #[serde(default)]
    pub label: Option<VersionLabel>,
    /// Mandatory comment.
    pub comment: String,
    /// The new revision's file, if any.
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

/// Result of a re-issue.
#[derive(Debug, Clone)]
pub struct ReissueOutcome {
    /// The updated document.
    pub document: Document,
    /// The record prepended to its history.
    pub record: DocumentVersion,
    /// Label before the re-issue.
    pub previous_version: VersionLabel,
}

/// Issues new revision labels.
#[derive(Debug, Clone)]
pub struct ReissueEngine {
    enforcer: Arc<WorkflowEnforcer>,
    config: Arc<WorkflowConfig>,
}

impl ReissueEngine {
    /// Creates a new re-issue engine.
    pub fn new(enforcer: Arc<WorkflowEnforcer>, config: Arc<WorkflowConfig>) -> Self {
        Self { enforcer, config }
    }

    /// Issue a new revision of `doc`.
    pub fn apply(
        &self,
        doc: &Document,
        request: &ReissueRequest,
        actor: &ActorContext,
        at: DateTime<Utc>,
    ) -> Result<ReissueOutcome, AppError> {
        self.enforcer.require_reissue(&actor.roles, doc)?;
        if request.comment.trim().is_empty() {
            return Err(AppError::validation(
                "A comment is required to issue a new revision",
            ));
        }

        let label = match &request.label {
            Some(label) => label.clone(),
            None => doc.current_version.successor().ok_or_else(|| {
                AppError::validation(format!(
                    "No successor can be derived for revision '{}'; provide a label",
                    doc.current_version
                ))
            })?,
        };
        if label == doc.current_version {
            return Err(AppError::validation(format!(
                "Revision '{label}' is already the current one"
            )));
        }

        let at = at.max(doc.last_modified);
        let record = DocumentVersion {
            version: label.clone(),
            status: doc.current_status,
            qualification: doc.current_qualification,
            updated_at: at,
            updated_by: actor.name.clone(),
            updated_by_role: Some(actor.primary_role()),
            comments: annotate(&self.config, &request.comment, request.attachment.as_ref()),
            attachment_name: request.attachment.as_ref().map(|a| a.name().to_string()),
            file_url: None,
            kind: VersionEntryKind::Reissue,
        };

        let previous_version = doc.current_version.clone();
        let mut document = doc.clone();
        document.current_version = label;
        document.last_modified = at;
        document.push_version(record.clone());

        info!(
            document_id = %document.id,
            from = %previous_version,
            to = %document.current_version,
            actor = %actor.user_id,
            "Revision issued"
        );

        Ok(ReissueOutcome {
            document,
            record,
            previous_version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docflow_core::error::ErrorKind;
    use docflow_entity::document::WorkflowStatus;
    use docflow_entity::user::UserRole;

    use crate::fixtures::{actor, at, document};

    fn reissue() -> ReissueEngine {
        ReissueEngine::new(
            Arc::new(WorkflowEnforcer::new()),
            Arc::new(WorkflowConfig::default()),
        )
    }

    fn request(comment: &str) -> ReissueRequest {
        ReissueRequest {
            label: None,
            comment: comment.to_string(),
            attachment: None,
        }
    }

    #[test]
    fn test_successor_label_is_issued() {
        let doc = document(WorkflowStatus::Draft, "0A");
        let mut req = request("revised drawing");
        req.attachment = Some(Attachment::Upload("rev-b.pdf".to_string()));
        let outcome = reissue()
            .apply(&doc, &req, &actor(&[UserRole::Designer]), at(2))
            .unwrap();

        assert_eq!(outcome.previous_version.as_str(), "0A");
        assert_eq!(outcome.document.current_version.as_str(), "0B");
        assert_eq!(outcome.document.current_status, WorkflowStatus::Draft);
        assert_eq!(outcome.record.kind, VersionEntryKind::Reissue);
        assert_eq!(outcome.record.version.as_str(), "0B");
        assert_eq!(outcome.record.comments, "revised drawing [New attachment]");
        assert_eq!(outcome.document.versions.len(), 2);
        assert!(!outcome.document.is_locked);

        let numeric = document(WorkflowStatus::InReview, "09");
        let outcome = reissue()
            .apply(&numeric, &request("next"), &actor(&[UserRole::TechLeader]), at(2))
            .unwrap();
        assert_eq!(outcome.document.current_version.as_str(), "10");
    }

    #[test]
    fn test_explicit_label_must_differ() {
        let doc = document(WorkflowStatus::Draft, "0A");
        let mut req = request("restart");
        req.label = Some(VersionLabel::parse("0A").unwrap());
        let err = reissue()
            .apply(&doc, &req, &actor(&[UserRole::Admin]), at(1))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        req.label = Some(VersionLabel::parse("1A").unwrap());
        let outcome = reissue()
            .apply(&doc, &req, &actor(&[UserRole::Admin]), at(1))
            .unwrap();
        assert_eq!(outcome.document.current_version.as_str(), "1A");
    }

    #[test]
    fn test_reissue_gate() {
        let sent = document(WorkflowStatus::AnalysisClient, "0A");
        let err = reissue()
            .apply(&sent, &request("x"), &actor(&[UserRole::Admin]), at(1))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition);

        let draft = document(WorkflowStatus::Draft, "0A");
        let err = reissue()
            .apply(&draft, &request("x"), &actor(&[UserRole::Client]), at(1))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition);

        let err = reissue()
            .apply(&draft, &request(" "), &actor(&[UserRole::Designer]), at(1))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
