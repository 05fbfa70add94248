//! Integration tests for transitions, batches, metadata and re-issue.

use docflow_core::error::ErrorKind;
use docflow_core::types::DocumentId;
use docflow_entity::document::{
    DocumentFilter, DocumentType, FieldUpdate, Qualification, VersionEntryKind, WorkflowStatus,
};
use docflow_service::workflow::{BatchItem, BatchRequest, MetadataOutcome, ReissueRequest};

use crate::helpers::{TestApp, new_drawing, request};

fn batch_of(ids: &[DocumentId], status: WorkflowStatus, q: Qualification) -> BatchRequest {
    BatchRequest {
        status,
        qualification: q,
        items: ids
            .iter()
            .map(|id| BatchItem {
                document_id: *id,
                comment: None,
                attachment: None,
            })
            .collect(),
    }
}

#[tokio::test]
async fn test_batch_issue_generates_one_transmittal() {
    let app = TestApp::new().await;
    let leader = app.actor("alice@docflow.local").await;

    let mut ids = Vec::new();
    for code in ["XV-EL-101", "XV-EL-102", "XV-EL-103"] {
        ids.push(app.submitted_drawing(code).await.id);
    }
    let before = app.document_count().await;

    let outcome = app
        .documents
        .batch(
            &leader,
            &batch_of(&ids, WorkflowStatus::AnalysisClient, Qualification::Approved),
        )
        .await
        .expect("Batch should succeed");

    assert_eq!(outcome.documents.len(), 3);
    assert_eq!(outcome.to_persist().len(), 4);
    assert_eq!(app.document_count().await, before + 1);

    let grd = outcome.transmittal.expect("transmittal");
    assert_eq!(grd.code, "GRD-0001");
    assert_eq!(grd.title, "Transmittal - XV-EL-101, XV-EL-102, XV-EL-103");
    assert_eq!(grd.doc_type, DocumentType::Transmittal);
    assert_eq!(grd.issuer, leader.name);
    assert_eq!(outcome.transmitted, ids);

    for id in &ids {
        let stored = app.document_by_id(*id).await;
        assert_eq!(stored.current_status, WorkflowStatus::AnalysisClient);
        assert_eq!(stored.current_qualification, Qualification::Approved);
        assert!(stored.is_locked);
        assert_eq!(stored.latest().unwrap().comments, "Batch update");
    }

    let names = app.store.events.names().await;
    assert_eq!(
        names
            .iter()
            .filter(|n| n.as_str() == "document.transmittal_generated")
            .count(),
        1
    );
}

#[tokio::test]
async fn test_mixed_batch_is_rejected_without_changes() {
    let app = TestApp::new().await;
    let leader = app.actor("alice@docflow.local").await;
    let evaluating = app.document("XV-CV-015").await;
    let reviewing = app.document("XV-MG-002").await;
    let before = app.document_count().await;
    let events_before = app.store.events.len().await;

    let err = app
        .documents
        .batch(
            &leader,
            &batch_of(
                &[evaluating.id, reviewing.id],
                WorkflowStatus::AnalysisClient,
                Qualification::Approved,
            ),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::MixedBatchStatus);
    assert_eq!(app.document_count().await, before);
    assert_eq!(app.document("XV-CV-015").await, evaluating);
    assert_eq!(app.document("XV-MG-002").await, reviewing);
    assert_eq!(app.store.events.len().await, events_before);
}

#[tokio::test]
async fn test_rejected_batches_leave_documents_untouched() {
    let app = TestApp::new().await;
    let designer = app.actor("bob@docflow.local").await;
    let leader = app.actor("alice@docflow.local").await;
    let project_id = app.project("XINGU-500").await;

    let draft = app
        .documents
        .create(&designer, project_id, new_drawing("XV-EL-201"))
        .await
        .unwrap();
    let submitted = app.submitted_drawing("XV-EL-202").await;

    let err = app
        .documents
        .batch(
            &leader,
            &batch_of(
                &[draft.id, submitted.id],
                WorkflowStatus::AnalysisClient,
                Qualification::Approved,
            ),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::MixedBatchStatus);

    let designer_batch = app
        .documents
        .batch(
            &designer,
            &batch_of(&[submitted.id], WorkflowStatus::AnalysisClient, Qualification::Approved),
        )
        .await
        .unwrap_err();
    assert_eq!(designer_batch.kind, ErrorKind::InvalidTransition);
    assert_eq!(
        app.document_by_id(submitted.id).await.current_status,
        WorkflowStatus::EvaluationLt
    );
}

#[tokio::test]
async fn test_single_issue_to_client_generates_transmittal() {
    let app = TestApp::new().await;
    let leader = app.actor("alice@docflow.local").await;
    let doc = app.submitted_drawing("XV-EL-301").await;

    let result = app
        .documents
        .transition(
            &leader,
            doc.id,
            &request(
                WorkflowStatus::AnalysisClient,
                Qualification::Approved,
                "Issued for approval.",
            ),
        )
        .await
        .unwrap();

    assert!(result.document.is_locked);
    let grd = result.transmittal.expect("transmittal");
    assert_eq!(grd.title, "Transmittal - XV-EL-301");
    assert_eq!(grd.last_modified, result.document.last_modified);
    assert_eq!(app.document(&grd.code).await.id, grd.id);
}

#[tokio::test]
async fn test_client_approval_branches_on_revision_label() {
    let app = TestApp::new().await;
    let client = app.actor("carol@client.local").await;
    let doc = app.document("XV-EL-001").await;

    let actions = app.documents.legal_actions(&client, doc.id).await.unwrap();
    let targets: Vec<(WorkflowStatus, Qualification)> = actions
        .iter()
        .map(|a| (a.target_status, a.target_qualification))
        .collect();
    assert_eq!(
        targets,
        vec![
            (WorkflowStatus::ModerationLt, Qualification::Approved),
            (WorkflowStatus::ModerationLt, Qualification::ApprovedWithComments),
            (WorkflowStatus::ModerationLt, Qualification::Rejected),
        ]
    );

    let err = app
        .documents
        .transition(
            &client,
            doc.id,
            &request(WorkflowStatus::Execution, Qualification::Approved, "Go."),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTransition);

    let result = app
        .documents
        .transition(
            &client,
            doc.id,
            &request(WorkflowStatus::ModerationLt, Qualification::Approved, "Approved."),
        )
        .await
        .unwrap();
    assert_eq!(result.document.current_status, WorkflowStatus::ModerationLt);
    assert!(!result.document.is_locked);
    assert!(result.transmittal.is_none());
}

#[tokio::test]
async fn test_blank_comment_is_rejected() {
    let app = TestApp::new().await;
    let leader = app.actor("alice@docflow.local").await;
    let doc = app.document("XV-CV-015").await;

    let err = app
        .documents
        .transition(
            &leader,
            doc.id,
            &request(WorkflowStatus::InReview, Qualification::Rejected, "   "),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(app.document("XV-CV-015").await, doc);
}

#[tokio::test]
async fn test_metadata_update_records_only_real_changes() {
    let app = TestApp::new().await;
    let leader = app.actor("alice@docflow.local").await;
    let doc = app.document("XV-EL-001").await;
    let history = doc.versions.len();

    let unchanged = app
        .documents
        .update_metadata(&leader, doc.id, &[FieldUpdate::Title(doc.title.clone())])
        .await
        .unwrap();
    assert!(!unchanged.is_changed());
    assert_eq!(app.document("XV-EL-001").await.versions.len(), history);

    let outcome = app
        .documents
        .update_metadata(
            &leader,
            doc.id,
            &[
                FieldUpdate::Title("Single-line diagram, substation B".to_string()),
                FieldUpdate::GeCode(None),
            ],
        )
        .await
        .unwrap();
    let MetadataOutcome::Updated { document, record, changes } = outcome else {
        panic!("expected an update");
    };
    assert_eq!(changes.len(), 2);
    assert_eq!(record.kind, VersionEntryKind::MetadataUpdate);
    assert_eq!(record.status, doc.current_status);
    assert!(record.comments.contains(
        r#"title: "Single-line diagram, substation A" -> "Single-line diagram, substation B""#
    ));
    assert!(record.comments.contains(r#"ge_code: "GE-001-X" -> "(empty)""#));
    assert_eq!(document.versions.len(), history + 1);
    assert_eq!(document.ge_code, None);
    assert_eq!(document.current_status, doc.current_status);
}

#[tokio::test]
async fn test_designer_cannot_edit_metadata() {
    let app = TestApp::new().await;
    let designer = app.actor("bob@docflow.local").await;
    let doc = app.document("XV-MG-002").await;

    let err = app
        .documents
        .update_metadata(&designer, doc.id, &[FieldUpdate::Informative(true)])
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_reissue_advances_revision() {
    let app = TestApp::new().await;
    let designer = app.actor("bob@docflow.local").await;
    let doc = app.document("XV-MG-002").await;

    let reissued = app
        .documents
        .reissue(
            &designer,
            doc.id,
            &ReissueRequest {
                label: None,
                comment: "Updated after review.".to_string(),
                attachment: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(reissued.current_version.as_str(), "02");
    assert_eq!(reissued.current_status, WorkflowStatus::InReview);
    assert_eq!(reissued.latest().unwrap().kind, VersionEntryKind::Reissue);

    let locked = app.document("XV-EL-001").await;
    let err = app
        .documents
        .reissue(
            &designer,
            locked.id,
            &ReissueRequest {
                label: None,
                comment: "Too late.".to_string(),
                attachment: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTransition);
}

#[tokio::test]
async fn test_client_history_hides_internal_entries() {
    let app = TestApp::new().await;
    let client = app.actor("carol@client.local").await;
    let leader = app.actor("alice@docflow.local").await;
    let doc = app.document("XV-CV-015").await;

    let as_leader = app.documents.get(&leader, doc.id).await.unwrap();
    assert_eq!(as_leader.versions.len(), 7);

    let as_client = app.documents.get(&client, doc.id).await.unwrap();
    let statuses: Vec<WorkflowStatus> = as_client.versions.iter().map(|v| v.status).collect();
    assert_eq!(
        statuses,
        vec![WorkflowStatus::ModerationLt, WorkflowStatus::AnalysisClient]
    );
}

#[tokio::test]
async fn test_scope_hides_other_projects() {
    let app = TestApp::new().await;
    let reader = app.actor("dave@docflow.local").await;

    let visible = app
        .documents
        .list(&reader, &DocumentFilter::default())
        .await
        .unwrap();
    let codes: Vec<&str> = visible.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, vec!["LTN-CV-001"]);

    let foreign = app.document("XV-EL-001").await;
    let err = app.documents.get(&reader, foreign.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);

    let own = app.document("LTN-CV-001").await;
    assert!(app.documents.legal_actions(&reader, own.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_client_cannot_register_documents() {
    let app = TestApp::new().await;
    let client = app.actor("carol@client.local").await;
    let project_id = app.project("XINGU-500").await;

    let err = app
        .documents
        .create(&client, project_id, new_drawing("XV-EL-901"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
}
