//! Shared builders for unit tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use docflow_auth::WorkflowEnforcer;
use docflow_core::config::workflow::WorkflowConfig;
use docflow_core::types::{DocumentId, ProjectId, UserId};
use docflow_entity::document::{
    Document, DocumentType, DocumentVersion, Qualification, VersionEntryKind, VersionLabel,
    WorkflowStatus,
};
use docflow_entity::user::{RoleSet, UserRole};

use crate::context::ActorContext;
use crate::workflow::TransitionEngine;

pub fn project() -> ProjectId {
    ProjectId::from_uuid(Uuid::from_u128(1))
}

/// Fixed clock: 2024-03-01T09:00:00Z plus `minutes`.
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes)
}

pub fn actor(roles: &[UserRole]) -> ActorContext {
    ActorContext::new(
        UserId::new(),
        "Test User",
        RoleSet::new(roles.iter().copied()).unwrap(),
        None,
    )
}

pub fn engine() -> TransitionEngine {
    TransitionEngine::new(
        Arc::new(WorkflowEnforcer::new()),
        Arc::new(WorkflowConfig::default()),
    )
}

pub fn document(status: WorkflowStatus, version: &str) -> Document {
    document_with_code("EL-001", status, version)
}

pub fn document_with_code(code: &str, status: WorkflowStatus, version: &str) -> Document {
    let label = VersionLabel::parse(version).unwrap();
    let doc_type = if label.is_numeric() {
        DocumentType::Managerial
    } else {
        DocumentType::Technical
    };
    Document {
        id: DocumentId::new(),
        project_id: project(),
        code: code.to_string(),
        title: format!("Title of {code}"),
        doc_type,
        discipline: "Electrical - EL".to_string(),
        nature: "Cable List - LC".to_string(),
        issuer: "Internal Engineering".to_string(),
        current_version: label.clone(),
        current_status: status,
        current_qualification: Qualification::None,
        is_locked: status == WorkflowStatus::AnalysisClient,
        versions: vec![DocumentVersion {
            version: label,
            status,
            qualification: Qualification::None,
            updated_at: at(0),
            updated_by: "Seed".to_string(),
            updated_by_role: Some(UserRole::Designer),
            comments: "Document created.".to_string(),
            attachment_name: None,
            file_url: None,
            kind: VersionEntryKind::Created,
        }],
        last_modified: at(0),
        forecast_date: None,
        informative: false,
        as_built: false,
        taf_tac: None,
        ge_code: None,
        access_code: None,
    }
}
