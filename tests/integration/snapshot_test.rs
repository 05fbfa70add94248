//! Integration tests for snapshot persistence.

use docflow_entity::document::{Qualification, WorkflowStatus};
use docflow_store::{MemoryStore, Snapshot};

use crate::helpers::{TestApp, request};

#[tokio::test]
async fn test_snapshot_survives_a_save_and_reload() {
    let app = TestApp::new().await;
    let leader = app.actor("alice@docflow.local").await;
    let doc = app.submitted_drawing("XV-EL-401").await;
    app.documents
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

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("docflow.json");
    let written = app.store.to_snapshot().await;
    written.save(&path, true).await.unwrap();

    let loaded = Snapshot::load(&path).await.unwrap().expect("snapshot");
    assert_eq!(loaded, written);
    assert!(!path.with_extension("json.tmp").exists());

    assert_eq!(
        loaded.events.last().map(|e| e.name()).as_deref(),
        Some("document.transmittal_generated")
    );

    let reopened = MemoryStore::from_snapshot(loaded);
    assert_eq!(reopened.to_snapshot().await, written);
    assert_eq!(reopened.events.names().await, app.store.events.names().await);
}

#[tokio::test]
async fn test_missing_snapshot_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = Snapshot::load(&dir.path().join("absent.json")).await.unwrap();
    assert!(loaded.is_none());
}
