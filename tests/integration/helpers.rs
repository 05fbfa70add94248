//! Shared test helpers for integration tests.

use std::sync::Arc;

use chrono::Utc;

use docflow_auth::WorkflowEnforcer;
use docflow_core::config::AppConfig;
use docflow_core::traits::Repository;
use docflow_core::types::{DocumentId, ProjectId};
use docflow_entity::catalog::SystemCatalog;
use docflow_entity::document::{
    Document, DocumentType, NewDocument, Qualification, WorkflowStatus,
};
use docflow_service::workflow::{
    SequentialCodeSource, TransitionRequest, TransmittalGenerator,
};
use docflow_service::{
    ActorContext, AdminService, CatalogService, DashboardService, DocumentService,
};
use docflow_store::MemoryStore;
use docflow_store::seed::demo_snapshot;

/// Demo data loaded into memory with every service wired on top.
pub struct TestApp {
    /// The backing store, for direct inspection.
    pub store: MemoryStore,
    /// Document operations.
    pub documents: DocumentService,
    /// Projects and users.
    pub admin: AdminService,
    /// Catalog maintenance.
    pub catalog: CatalogService,
    /// Dashboard.
    pub dashboard: DashboardService,
}

impl TestApp {
    /// Seed the demo data set and wire the services.
    ///
    /// Transmittal codes are sequential (`GRD-0001`, ...) so tests can
    /// assert on them.
    pub async fn new() -> Self {
        let config = AppConfig::default();
        let snapshot = demo_snapshot(SystemCatalog::from(config.catalog.clone()), Utc::now())
            .expect("Failed to build demo data");
        let store = MemoryStore::from_snapshot(snapshot);

        let enforcer = Arc::new(WorkflowEnforcer::new());
        let workflow = Arc::new(config.workflow.clone());
        let transmittal = Arc::new(config.transmittal.clone());
        let documents = DocumentService::new(
            store.documents.clone(),
            store.projects.clone(),
            store.catalog.clone(),
            store.events.clone(),
            Arc::clone(&enforcer),
            Arc::clone(&workflow),
            Arc::clone(&transmittal),
        )
        .with_transmittal_generator(TransmittalGenerator::with_code_source(
            transmittal,
            Arc::new(SequentialCodeSource::default()),
        ));
        let admin = AdminService::new(
            store.projects.clone(),
            store.users.clone(),
            Arc::clone(&enforcer),
        );
        let catalog = CatalogService::new(store.catalog.clone(), enforcer);
        let dashboard = DashboardService::new(store.documents.clone(), workflow);

        Self {
            store,
            documents,
            admin,
            catalog,
            dashboard,
        }
    }

    /// Actor context for a seeded user.
    pub async fn actor(&self, email: &str) -> ActorContext {
        let user = self
            .admin
            .find_user_by_email(email)
            .await
            .expect("Seeded user not found");
        ActorContext::from_user(&user)
    }

    /// Project id by code.
    pub async fn project(&self, code: &str) -> ProjectId {
        self.store
            .projects
            .find_all()
            .await
            .expect("Failed to list projects")
            .into_iter()
            .find(|p| p.code == code)
            .map(|p| p.id)
            .expect("Seeded project not found")
    }

    /// Stored document by code, unredacted.
    pub async fn document(&self, code: &str) -> Document {
        self.store
            .documents
            .find_all()
            .await
            .expect("Failed to list documents")
            .into_iter()
            .find(|d| d.code == code)
            .expect("Document not found")
    }

    /// Stored document by id, unredacted.
    pub async fn document_by_id(&self, id: DocumentId) -> Document {
        self.store
            .documents
            .find_by_id(&id)
            .await
            .expect("Failed to load document")
            .expect("Document not found")
    }

    /// Number of stored documents.
    pub async fn document_count(&self) -> u64 {
        self.store
            .documents
            .count()
            .await
            .expect("Failed to count documents")
    }

    /// Register a technical drawing in the substation project as the
    /// designer, then submit it for evaluation.
    pub async fn submitted_drawing(&self, code: &str) -> Document {
        let designer = self.actor("bob@docflow.local").await;
        let project_id = self.project("XINGU-500").await;
        let doc = self
            .documents
            .create(&designer, project_id, new_drawing(code))
            .await
            .expect("Failed to create document");

        self.documents
            .transition(
                &designer,
                doc.id,
                &request(WorkflowStatus::EvaluationLt, Qualification::None, "Ready."),
            )
            .await
            .expect("Failed to submit document")
            .document
    }
}

/// Payload for a catalogued technical drawing.
pub fn new_drawing(code: &str) -> NewDocument {
    NewDocument {
        code: code.to_string(),
        title: format!("Drawing {code}"),
        doc_type: DocumentType::Technical,
        discipline: "Electrical - EL".to_string(),
        nature: "Interconnection Diagram - DI".to_string(),
        issuer: "Internal Engineering".to_string(),
        file_name: Some(format!("{code}.pdf")),
        ge_code: None,
        access_code: None,
        taf_tac: None,
        forecast_date: None,
        informative: false,
        as_built: false,
    }
}

/// A transition request without attachment.
pub fn request(
    status: WorkflowStatus,
    qualification: Qualification,
    comment: &str,
) -> TransitionRequest {
    TransitionRequest {
        status,
        qualification,
        comment: comment.to_string(),
        attachment: None,
    }
}
