//! Document operations against the store, with scope checks and events.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use docflow_auth::{WorkflowAction, WorkflowEnforcer};
use docflow_core::config::transmittal::TransmittalConfig;
use docflow_core::config::workflow::WorkflowConfig;
use docflow_core::error::AppError;
use docflow_core::events::{DocumentEvent, DomainEvent};
use docflow_core::traits::{EventSink, Repository};
use docflow_core::types::{DocumentId, ProjectId};
use docflow_entity::catalog::CatalogKind;
use docflow_entity::document::{Document, DocumentFilter, FieldUpdate, NewDocument};
use docflow_entity::project::Project;
use docflow_entity::user::UserRole;
use docflow_store::CatalogStore;

use crate::context::ActorContext;
use crate::workflow::create::require_catalogued;
use crate::workflow::{
    BatchEngine, BatchOutcome, BatchRequest, DocumentFactory, MetadataAuditor, MetadataOutcome,
    ReissueEngine, ReissueRequest, TransitionEngine, TransitionRequest, TransmittalGenerator,
};

/// Result of a single-document transition.
#[derive(Debug, Clone)]
pub struct TransitionResult {
    /// The updated document.
    pub document: Document,
    /// Transmittal generated because the document entered client analysis.
    pub transmittal: Option<Document>,
}

/// Runs the workflow engines against the document store.
///
/// Every mutating call loads the current state, runs one engine, saves all
/// changed documents in a single `save_all` and then publishes the
/// matching domain events.
#[derive(Clone)]
pub struct DocumentService {
    /// Document store.
    documents: Arc<dyn Repository<Document>>,
    /// Project store, used to validate new documents.
    projects: Arc<dyn Repository<Project>>,
    /// Running catalog.
    catalog: CatalogStore,
    /// Event sink.
    events: Arc<dyn EventSink>,
    /// Workflow rule enforcer.
    enforcer: Arc<WorkflowEnforcer>,
    /// Workflow settings.
    config: Arc<WorkflowConfig>,
    /// Single-document transitions.
    transitions: TransitionEngine,
    /// Transmittal generator.
    transmittals: TransmittalGenerator,
    /// Batch transitions.
    batches: BatchEngine,
    /// Metadata diff and audit.
    auditor: MetadataAuditor,
    /// Revision re-issue.
    reissues: ReissueEngine,
    /// Document registration.
    factory: DocumentFactory,
}

impl std::fmt::Debug for DocumentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        documents: Arc<dyn Repository<Document>>,
        projects: Arc<dyn Repository<Project>>,
        catalog: CatalogStore,
        events: Arc<dyn EventSink>,
        enforcer: Arc<WorkflowEnforcer>,
        config: Arc<WorkflowConfig>,
        transmittal_config: Arc<TransmittalConfig>,
    ) -> Self {
        let transitions = TransitionEngine::new(Arc::clone(&enforcer), Arc::clone(&config));
        let transmittals = TransmittalGenerator::new(transmittal_config);
        Self {
            documents,
            projects,
            catalog,
            events,
            batches: BatchEngine::new(transitions.clone(), transmittals.clone()),
            auditor: MetadataAuditor::new(Arc::clone(&config)),
            reissues: ReissueEngine::new(Arc::clone(&enforcer), Arc::clone(&config)),
            factory: DocumentFactory::new(Arc::clone(&config)),
            transitions,
            transmittals,
            enforcer,
            config,
        }
    }

    /// Replace the transmittal generator, e.g. to use sequential codes.
    pub fn with_transmittal_generator(mut self, generator: TransmittalGenerator) -> Self {
        self.batches = BatchEngine::new(self.transitions.clone(), generator.clone());
        self.transmittals = generator;
        self
    }

    /// Documents in the actor's scope matching `filter`, newest first.
    ///
    /// History entries the actor may not see are removed.
    pub async fn list(
        &self,
        actor: &ActorContext,
        filter: &DocumentFilter,
    ) -> Result<Vec<Document>, AppError> {
        let scope = actor.scope();
        let all = self.documents.find_all().await?;
        let visible = all.into_iter().filter(|d| scope.allows(d.project_id));
        Ok(filter
            .apply(visible)
            .iter()
            .map(|d| scope.redact(d))
            .collect())
    }

    /// A single document as the actor sees it.
    pub async fn get(&self, actor: &ActorContext, id: DocumentId) -> Result<Document, AppError> {
        let doc = self.load(actor, id).await?;
        Ok(actor.scope().redact(&doc))
    }

    /// Workflow actions the actor may take on a document.
    pub async fn legal_actions(
        &self,
        actor: &ActorContext,
        id: DocumentId,
    ) -> Result<Vec<WorkflowAction>, AppError> {
        let doc = self.load(actor, id).await?;
        Ok(self.enforcer.legal_actions(&actor.roles, &doc))
    }

    /// Workflow actions legal on every document of a selection.
    pub async fn batch_actions(
        &self,
        actor: &ActorContext,
        ids: &[DocumentId],
    ) -> Result<Vec<WorkflowAction>, AppError> {
        let docs = self.load_many(actor, ids).await?;
        self.enforcer.batch_actions(&actor.roles, &docs)
    }

    /// Apply a workflow action to one document.
    ///
    /// When the document enters client analysis a transmittal covering it
    /// is generated and saved with it.
    pub async fn transition(
        &self,
        actor: &ActorContext,
        id: DocumentId,
        request: &TransitionRequest,
    ) -> Result<TransitionResult, AppError> {
        let doc = self.load(actor, id).await?;
        let outcome = self.transitions.apply(&doc, request, actor, Utc::now())?;

        let transmittal = if outcome.triggers_transmittal {
            let taken = self.taken_codes().await?;
            Some(self.transmittals.generate(
                std::slice::from_ref(&outcome.document),
                actor,
                outcome.document.project_id,
                &taken,
                outcome.document.last_modified,
            )?)
        } else {
            None
        };

        let mut to_save = vec![outcome.document.clone()];
        to_save.extend(transmittal.iter().cloned());

        let mut events = vec![status_changed(actor, &outcome.document, outcome.previous_status.as_str())];
        if let Some(grd) = &transmittal {
            events.push(transmittal_generated(actor, grd, &[outcome.document.id]));
        }
        self.commit(&to_save, events).await?;

        Ok(TransitionResult {
            document: outcome.document,
            transmittal,
        })
    }

    /// Apply one workflow action to several documents.
    ///
    /// Every document must resolve and be in scope; the batch engine then
    /// validates the whole selection before anything changes.
    pub async fn batch(
        &self,
        actor: &ActorContext,
        request: &BatchRequest,
    ) -> Result<BatchOutcome, AppError> {
        let ids: Vec<DocumentId> = request.items.iter().map(|i| i.document_id).collect();
        let docs = self.load_many(actor, &ids).await?;
        let taken = self.taken_codes().await?;
        let outcome = self
            .batches
            .apply(&docs, request, actor, &taken, Utc::now())?;

        let mut events: Vec<DomainEvent> = docs
            .iter()
            .zip(&outcome.documents)
            .map(|(before, after)| status_changed(actor, after, before.current_status.as_str()))
            .collect();
        if let Some(grd) = &outcome.transmittal {
            events.push(transmittal_generated(actor, grd, &outcome.transmitted));
        }
        self.commit(&outcome.to_persist(), events).await?;

        Ok(outcome)
    }

    /// Apply a partial metadata update.
    ///
    /// Only administrators and tech leaders may edit metadata. With
    /// catalog enforcement on, new discipline, nature and issuer values
    /// must be listed.
    pub async fn update_metadata(
        &self,
        actor: &ActorContext,
        id: DocumentId,
        updates: &[FieldUpdate],
    ) -> Result<MetadataOutcome, AppError> {
        self.enforcer
            .require_manager(&actor.roles, "edit document metadata")?;
        let doc = self.load(actor, id).await?;

        if self.config.enforce_catalog {
            let catalog = self.catalog.get().await;
            for (kind, value) in updates.iter().filter_map(catalog_entry) {
                require_catalogued(&catalog, kind, value.trim())?;
            }
        }

        let outcome = self.auditor.apply(&doc, updates, actor, Utc::now())?;
        if let MetadataOutcome::Updated {
            document, changes, ..
        } = &outcome
        {
            let event = DomainEvent::document(
                Some(actor.user_id),
                document.last_modified,
                DocumentEvent::MetadataUpdated {
                    document_id: document.id,
                    changed_fields: changes.iter().map(|c| c.field.to_string()).collect(),
                },
            );
            self.commit(std::slice::from_ref(document), vec![event])
                .await?;
        }
        Ok(outcome)
    }

    /// Issue a new revision of a document.
    pub async fn reissue(
        &self,
        actor: &ActorContext,
        id: DocumentId,
        request: &ReissueRequest,
    ) -> Result<Document, AppError> {
        let doc = self.load(actor, id).await?;
        let outcome = self.reissues.apply(&doc, request, actor, Utc::now())?;

        let event = DomainEvent::document(
            Some(actor.user_id),
            outcome.document.last_modified,
            DocumentEvent::VersionReissued {
                document_id: outcome.document.id,
                from_version: outcome.previous_version.to_string(),
                to_version: outcome.document.current_version.to_string(),
            },
        );
        self.commit(std::slice::from_ref(&outcome.document), vec![event])
            .await?;
        Ok(outcome.document)
    }

    /// Register a new document in `project_id`.
    pub async fn create(
        &self,
        actor: &ActorContext,
        project_id: ProjectId,
        payload: NewDocument,
    ) -> Result<Document, AppError> {
        actor.scope().require(project_id)?;
        if !actor.roles.contains_any(CREATOR_ROLES) {
            return Err(AppError::authorization(
                "Only designers, tech leaders and administrators may register documents",
            ));
        }
        self.projects
            .find_by_id(&project_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {project_id} not found")))?;

        let catalog = self.catalog.get().await;
        let doc = self
            .factory
            .create(payload, project_id, actor, &catalog, Utc::now())?;

        let event = DomainEvent::document(
            Some(actor.user_id),
            doc.last_modified,
            DocumentEvent::Created {
                document_id: doc.id,
                project_id,
                code: doc.code.clone(),
            },
        );
        self.commit(std::slice::from_ref(&doc), vec![event]).await?;
        Ok(doc)
    }

    async fn load(&self, actor: &ActorContext, id: DocumentId) -> Result<Document, AppError> {
        let doc = self
            .documents
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))?;
        actor.scope().require(doc.project_id)?;
        Ok(doc)
    }

    async fn load_many(
        &self,
        actor: &ActorContext,
        ids: &[DocumentId],
    ) -> Result<Vec<Document>, AppError> {
        let mut docs = Vec::with_capacity(ids.len());
        for id in ids {
            docs.push(self.load(actor, *id).await?);
        }
        Ok(docs)
    }

    async fn taken_codes(&self) -> Result<HashSet<String>, AppError> {
        Ok(self
            .documents
            .find_all()
            .await?
            .into_iter()
            .map(|d| d.code)
            .collect())
    }

    async fn commit(&self, docs: &[Document], events: Vec<DomainEvent>) -> Result<(), AppError> {
        self.documents.save_all(docs).await?;
        info!(count = docs.len(), "Documents saved");
        if let Err(e) = self.events.publish(events).await {
            warn!(error = %e, "Failed to publish domain events");
        }
        Ok(())
    }
}

/// Roles allowed to register documents.
const CREATOR_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::TechLeader, UserRole::Designer];

fn catalog_entry(update: &FieldUpdate) -> Option<(CatalogKind, &str)> {
    match update {
        FieldUpdate::Discipline(v) => Some((CatalogKind::Discipline, v)),
        FieldUpdate::Nature(v) => Some((CatalogKind::Nature, v)),
        FieldUpdate::Issuer(v) => Some((CatalogKind::Issuer, v)),
        _ => None,
    }
}

fn status_changed(actor: &ActorContext, doc: &Document, from: &str) -> DomainEvent {
    DomainEvent::document(
        Some(actor.user_id),
        doc.last_modified,
        DocumentEvent::StatusChanged {
            document_id: doc.id,
            from_status: from.to_string(),
            to_status: doc.current_status.to_string(),
            qualification: doc.current_qualification.to_string(),
        },
    )
}

fn transmittal_generated(actor: &ActorContext, grd: &Document, related: &[DocumentId]) -> DomainEvent {
    DomainEvent::document(
        Some(actor.user_id),
        grd.last_modified,
        DocumentEvent::TransmittalGenerated {
            transmittal_id: grd.id,
            code: grd.code.clone(),
            related: related.to_vec(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use docflow_core::error::ErrorKind;
    use docflow_entity::catalog::SystemCatalog;
    use docflow_entity::document::{Qualification, WorkflowStatus};
    use docflow_store::MemoryStore;

    use crate::fixtures::{actor, document};

    fn service(store: &MemoryStore, config: WorkflowConfig) -> DocumentService {
        DocumentService::new(
            store.documents.clone(),
            store.projects.clone(),
            store.catalog.clone(),
            store.events.clone(),
            Arc::new(WorkflowEnforcer::new()),
            Arc::new(config),
            Arc::new(TransmittalConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_transition_saves_transmittal_and_events() {
        let store = MemoryStore::default();
        let doc = document(WorkflowStatus::EvaluationLt, "0A");
        store.documents.save(&doc).await.unwrap();
        let svc = service(&store, WorkflowConfig::default());

        let result = svc
            .transition(
                &actor(&[UserRole::TechLeader]),
                doc.id,
                &TransitionRequest {
                    status: WorkflowStatus::AnalysisClient,
                    qualification: Qualification::Approved,
                    comment: "send".to_string(),
                    attachment: None,
                },
            )
            .await
            .unwrap();

        let grd = result.transmittal.expect("transmittal");
        assert_eq!(store.documents.count().await.unwrap(), 2);
        assert!(store.documents.find_by_id(&grd.id).await.unwrap().is_some());
        assert_eq!(
            store.events.names().await,
            vec!["document.status_changed", "document.transmittal_generated"]
        );
    }

    #[tokio::test]
    async fn test_rejected_transition_leaves_store_untouched() {
        let store = MemoryStore::default();
        let doc = document(WorkflowStatus::Draft, "0A");
        store.documents.save(&doc).await.unwrap();
        let svc = service(&store, WorkflowConfig::default());

        let err = svc
            .transition(
                &actor(&[UserRole::Reader]),
                doc.id,
                &TransitionRequest {
                    status: WorkflowStatus::InReview,
                    qualification: Qualification::None,
                    comment: "go".to_string(),
                    attachment: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition);
        assert_eq!(store.documents.find_by_id(&doc.id).await.unwrap(), Some(doc));
        assert!(store.events.is_empty().await);
    }

    #[tokio::test]
    async fn test_metadata_gate_and_catalog() {
        let store = MemoryStore::new(SystemCatalog {
            disciplines: vec!["Electrical - EL".to_string()],
            natures: vec![],
            issuers: vec![],
        });
        let doc = document(WorkflowStatus::Draft, "0A");
        store.documents.save(&doc).await.unwrap();
        let svc = service(
            &store,
            WorkflowConfig {
                enforce_catalog: true,
                ..WorkflowConfig::default()
            },
        );

        let err = svc
            .update_metadata(&actor(&[UserRole::Designer]), doc.id, &[FieldUpdate::AsBuilt(true)])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let err = svc
            .update_metadata(
                &actor(&[UserRole::Admin]),
                doc.id,
                &[FieldUpdate::Discipline("Civil - CV".to_string())],
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let outcome = svc
            .update_metadata(&actor(&[UserRole::Admin]), doc.id, &[FieldUpdate::AsBuilt(true)])
            .await
            .unwrap();
        assert!(outcome.is_changed());
        assert_eq!(store.events.names().await, vec!["document.metadata_updated"]);
    }

    #[tokio::test]
    async fn test_missing_document_is_not_found() {
        let store = MemoryStore::default();
        let svc = service(&store, WorkflowConfig::default());
        let err = svc
            .get(&actor(&[UserRole::Admin]), DocumentId::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
