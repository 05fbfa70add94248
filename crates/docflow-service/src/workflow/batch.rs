//! Batch Reconciliation: one action applied to several documents at once.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use docflow_core::error::AppError;
use docflow_core::types::DocumentId;
use docflow_entity::document::{Attachment, Document, DocumentVersion, Qualification, WorkflowStatus};

use crate::context::ActorContext;

use super::transition::TransitionEngine;
use super::transmittal::TransmittalGenerator;

/// Per-document input of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    /// The document.
    pub document_id: DocumentId,
    /// Comment; blank falls back to the configured default.
    #[serde(default)]
    pub comment: Option<String>,
    /// Optional attachment.
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

impl BatchItem {
    /// An item with no comment and no attachment.
    pub fn bare(document_id: DocumentId) -> Self {
        Self {
            document_id,
            comment: None,
            attachment: None,
        }
    }
}

/// A workflow action applied to several documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Target status.
    pub status: WorkflowStatus,
    /// Target qualification.
    pub qualification: Qualification,
    /// One entry per document.
    pub items: Vec<BatchItem>,
}

/// Result of a committed batch.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Updated documents, in request order.
    pub documents: Vec<Document>,
    /// Records prepended, one per document, in request order.
    pub records: Vec<DocumentVersion>,
    /// The single transmittal, when any document entered client analysis.
    pub transmittal: Option<Document>,
    /// Documents the transmittal covers.
    pub transmitted: Vec<DocumentId>,
}

impl BatchOutcome {
    /// Every entity the caller must persist: the updates, then the
    /// transmittal if one was generated.
    pub fn to_persist(&self) -> Vec<Document> {
        let mut all = self.documents.clone();
        all.extend(self.transmittal.iter().cloned());
        all
    }
}

/// Applies batch transitions on top of the per-document engine.
#[derive(Debug, Clone)]
pub struct BatchEngine {
    /// Per-document engine.
    transitions: TransitionEngine,
    /// Transmittal generator.
    transmittals: TransmittalGenerator,
}

impl BatchEngine {
    /// Creates a new batch engine.
    pub fn new(transitions: TransitionEngine, transmittals: TransmittalGenerator) -> Self {
        Self {
            transitions,
            transmittals,
        }
    }

    /// Validates the whole batch, then applies it.
    ///
    /// `docs` must hold exactly the documents named by the request items.
    /// Every check runs before any document is touched: a shared status,
    /// a single project, no repeated document, and the action legal on
    /// each. Unlike the single path a blank comment is replaced by the
    /// configured default. If any document enters client analysis, one
    /// transmittal is generated for all of them; `taken_codes` lists codes
    /// already in use.
    pub fn apply(
        &self,
        docs: &[Document],
        request: &BatchRequest,
        actor: &ActorContext,
        taken_codes: &HashSet<String>,
        at: DateTime<Utc>,
    ) -> Result<BatchOutcome, AppError> {
        let items = index_items(docs, request)?;
        let enforcer = self.transitions.enforcer();
        enforcer.authorize_batch(&actor.roles, docs, request.status, request.qualification)?;

        let project_id = docs[0].project_id;
        if docs.iter().any(|d| d.project_id != project_id) {
            return Err(AppError::validation(
                "All documents of a batch must belong to the same project",
            ));
        }

        let default_comment = &self.transitions.config().batch_default_comment;
        let mut documents = Vec::with_capacity(docs.len());
        let mut records = Vec::with_capacity(docs.len());
        let mut triggering = Vec::new();

        for doc in docs {
            let item = items.get(&doc.id).copied();
            let comment = item
                .and_then(|i| i.comment.as_deref())
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(default_comment.as_str());
            let attachment = item.and_then(|i| i.attachment.as_ref());

            let outcome = self.transitions.commit(
                doc,
                request.status,
                request.qualification,
                comment,
                attachment,
                actor,
                at,
            );
            if outcome.triggers_transmittal {
                triggering.push(outcome.document.clone());
            }
            records.push(outcome.record);
            documents.push(outcome.document);
        }

        let transmittal = if triggering.is_empty() {
            None
        } else {
            let stamp = triggering
                .iter()
                .map(|d| d.last_modified)
                .max()
                .unwrap_or(at);
            Some(
                self.transmittals
                    .generate(&triggering, actor, project_id, taken_codes, stamp)?,
            )
        };

        info!(
            count = documents.len(),
            to = %request.status,
            transmittal = transmittal.is_some(),
            actor = %actor.user_id,
            "Batch applied"
        );

        Ok(BatchOutcome {
            documents,
            records,
            transmittal,
            transmitted: triggering.iter().map(|d| d.id).collect(),
        })
    }
}

/// Map items by document, checking that items and documents correspond
/// one to one.
fn index_items<'r>(
    docs: &[Document],
    request: &'r BatchRequest,
) -> Result<HashMap<DocumentId, &'r BatchItem>, AppError> {
    if docs.is_empty() || request.items.is_empty() {
        return Err(AppError::validation(
            "A batch must contain at least one document",
        ));
    }

    let mut items = HashMap::with_capacity(request.items.len());
    for item in &request.items {
        if items.insert(item.document_id, item).is_some() {
            return Err(AppError::validation(format!(
                "Document {} appears more than once in the batch",
                item.document_id
            )));
        }
    }

    let loaded: HashSet<DocumentId> = docs.iter().map(|d| d.id).collect();
    if loaded.len() != docs.len() || loaded.len() != items.len() {
        return Err(AppError::validation(
            "Batch documents do not match the requested items",
        ));
    }
    if let Some(missing) = items.keys().find(|id| !loaded.contains(id)) {
        return Err(AppError::validation(format!(
            "Document {missing} is not part of the batch"
        )));
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use docflow_core::config::transmittal::TransmittalConfig;
    use docflow_core::error::ErrorKind;
    use docflow_entity::user::UserRole;

    use crate::fixtures::{actor, at, document, document_with_code, engine};
    use crate::workflow::transmittal::SequentialCodeSource;

    fn batch_engine() -> BatchEngine {
        BatchEngine::new(
            engine(),
            TransmittalGenerator::with_code_source(
                Arc::new(TransmittalConfig::default()),
                Arc::new(SequentialCodeSource::default()),
            ),
        )
    }

    fn request_for(docs: &[Document], status: WorkflowStatus, qualification: Qualification) -> BatchRequest {
        BatchRequest {
            status,
            qualification,
            items: docs.iter().map(|d| BatchItem::bare(d.id)).collect(),
        }
    }

    #[test]
    fn test_batch_generates_one_transmittal() {
        let docs = vec![
            document_with_code("EL-001", WorkflowStatus::EvaluationLt, "0A"),
            document_with_code("EL-002", WorkflowStatus::EvaluationLt, "0A"),
            document_with_code("EL-003", WorkflowStatus::EvaluationLt, "0A"),
        ];
        let request = request_for(&docs, WorkflowStatus::AnalysisClient, Qualification::Approved);
        let outcome = batch_engine()
            .apply(&docs, &request, &actor(&[UserRole::TechLeader]), &HashSet::new(), at(1))
            .unwrap();

        let transmittal = outcome.transmittal.as_ref().expect("transmittal");
        assert_eq!(transmittal.title, "Transmittal - EL-001, EL-002, EL-003");
        assert_eq!(outcome.transmitted.len(), 3);
        assert_eq!(outcome.to_persist().len(), 4);
        for doc in &outcome.documents {
            assert_eq!(doc.current_status, WorkflowStatus::AnalysisClient);
            assert_eq!(doc.current_qualification, Qualification::Approved);
            assert_eq!(doc.versions[0].comments, "Batch update");
            assert!(doc.is_locked);
        }
    }

    #[test]
    fn test_mixed_batch_leaves_documents_untouched() {
        let docs = vec![
            document(WorkflowStatus::Draft, "0A"),
            document(WorkflowStatus::EvaluationLt, "0A"),
        ];
        let snapshot = docs.clone();
        let request = request_for(&docs, WorkflowStatus::InReview, Qualification::None);
        let err = batch_engine()
            .apply(&docs, &request, &actor(&[UserRole::Admin]), &HashSet::new(), at(1))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MixedBatchStatus);
        assert_eq!(docs, snapshot);
    }

    #[test]
    fn test_one_illegal_document_rejects_the_batch() {
        let docs = vec![
            document(WorkflowStatus::AnalysisClient, "01"),
            document(WorkflowStatus::AnalysisClient, "0B"),
        ];
        let request = request_for(&docs, WorkflowStatus::Execution, Qualification::Approved);
        let err = batch_engine()
            .apply(&docs, &request, &actor(&[UserRole::Client]), &HashSet::new(), at(1))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition);
    }

    #[test]
    fn test_item_comments_and_attachments() {
        let docs = vec![
            document(WorkflowStatus::Draft, "0A"),
            document(WorkflowStatus::Draft, "0A"),
        ];
        let request = BatchRequest {
            status: WorkflowStatus::EvaluationLt,
            qualification: Qualification::None,
            items: vec![
                BatchItem {
                    document_id: docs[0].id,
                    comment: Some("checked".to_string()),
                    attachment: Some(Attachment::Forwarded("a.pdf".to_string())),
                },
                BatchItem {
                    document_id: docs[1].id,
                    comment: Some("  ".to_string()),
                    attachment: None,
                },
            ],
        };
        let outcome = batch_engine()
            .apply(&docs, &request, &actor(&[UserRole::Designer]), &HashSet::new(), at(1))
            .unwrap();
        assert!(outcome.transmittal.is_none());
        assert_eq!(
            outcome.records[0].comments,
            "checked [Forwarded attachment: a.pdf]"
        );
        assert_eq!(outcome.records[1].comments, "Batch update");
    }

    #[test]
    fn test_items_must_match_documents() {
        let docs = vec![document(WorkflowStatus::Draft, "0A")];
        let mut request = request_for(&docs, WorkflowStatus::InReview, Qualification::None);
        request.items.push(BatchItem::bare(docs[0].id));
        let err = batch_engine()
            .apply(&docs, &request, &actor(&[UserRole::Admin]), &HashSet::new(), at(1))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let other = document(WorkflowStatus::Draft, "0A");
        let request = request_for(&[other], WorkflowStatus::InReview, Qualification::None);
        let err = batch_engine()
            .apply(&docs, &request, &actor(&[UserRole::Admin]), &HashSet::new(), at(1))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
