//! Demo data written by `docflow init`.

use chrono::{DateTime, Duration, Utc};

use docflow_core::result::AppResult;
use docflow_core::types::{DocumentId, ProjectId, UserId};
use docflow_entity::catalog::SystemCatalog;
use docflow_entity::document::{
    Document, DocumentType, DocumentVersion, Qualification, VersionEntryKind, VersionLabel,
    WorkflowStatus,
};
use docflow_entity::project::Project;
use docflow_entity::user::{RoleSet, User, UserRole};

use crate::snapshot::Snapshot;

/// One history step, oldest first.
struct Step {
    days_ago: i64,
    version: &'static str,
    status: WorkflowStatus,
    qualification: Qualification,
    by: &'static str,
    role: UserRole,
    comment: &'static str,
    kind: VersionEntryKind,
}

impl Step {
    fn new(
        days_ago: i64,
        version: &'static str,
        status: WorkflowStatus,
        qualification: Qualification,
        by: (&'static str, UserRole),
        comment: &'static str,
        kind: VersionEntryKind,
    ) -> Self {
        Self {
            days_ago,
            version,
            status,
            qualification,
            by: by.0,
            role: by.1,
            comment,
            kind,
        }
    }
}

/// Static description of a seeded document.
struct Seed {
    project: ProjectId,
    code: &'static str,
    title: &'static str,
    doc_type: DocumentType,
    discipline: &'static str,
    nature: &'static str,
    issuer: &'static str,
    forecast_in_days: Option<i64>,
    ge_code: Option<&'static str>,
    steps: Vec<Step>,
}

impl Seed {
    fn build(self, now: DateTime<Utc>) -> AppResult<Document> {
        let mut versions = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            versions.push(DocumentVersion {
                version: VersionLabel::parse(step.version)?,
                status: step.status,
                qualification: step.qualification,
                updated_at: now - Duration::days(step.days_ago),
                updated_by: step.by.to_string(),
                updated_by_role: Some(step.role),
                comments: step.comment.to_string(),
                attachment_name: None,
                file_url: None,
                kind: step.kind,
            });
        }
        versions.reverse();

        let (current_version, current_status, current_qualification, last_modified) =
            match versions.first() {
                Some(v) => (v.version.clone(), v.status, v.qualification, v.updated_at),
                None => (
                    self.doc_type.initial_version(),
                    WorkflowStatus::Draft,
                    Qualification::None,
                    now,
                ),
            };

        Ok(Document {
            id: DocumentId::new(),
            project_id: self.project,
            code: self.code.to_string(),
            title: self.title.to_string(),
            doc_type: self.doc_type,
            discipline: self.discipline.to_string(),
            nature: self.nature.to_string(),
            issuer: self.issuer.to_string(),
            current_version,
            is_locked: self.doc_type == DocumentType::Transmittal
                || current_status == WorkflowStatus::AnalysisClient,
            current_status,
            current_qualification,
            versions,
            last_modified,
            forecast_date: self
                .forecast_in_days
                .map(|days| now.date_naive() + Duration::days(days)),
            informative: false,
            as_built: false,
            taf_tac: None,
            ge_code: self.ge_code.map(String::from),
            access_code: None,
        })
    }
}

/// Build the demo data set: two projects, one user per role and a handful
/// of documents spread over the workflow.
pub fn demo_snapshot(catalog: SystemCatalog, now: DateTime<Utc>) -> AppResult<Snapshot> {
    use Qualification as Q;
    use VersionEntryKind as K;
    use WorkflowStatus as S;

    let substation = Project {
        id: ProjectId::new(),
        name: "Xingu 500kV Substation".to_string(),
        code: "XINGU-500".to_string(),
        description: "Substation expansion".to_string(),
        wbs: "WBS-XINGU-001".to_string(),
        substation: "SE Xingu".to_string(),
        direct_client: "Transmission Energy".to_string(),
        final_client: "National Grid Operator".to_string(),
    };
    let line = Project {
        id: ProjectId::new(),
        name: "North Transmission Line".to_string(),
        code: "LT-NORTH".to_string(),
        description: String::new(),
        wbs: "WBS-LT-002".to_string(),
        substation: "LT North Lot A".to_string(),
        direct_client: "North Consortium".to_string(),
        final_client: "Regulator".to_string(),
    };

    let user = |email: &str, name: &str, role: UserRole, project: Option<ProjectId>| User {
        id: UserId::new(),
        email: email.to_string(),
        name: name.to_string(),
        roles: RoleSet::single(role),
        project_id: project,
    };
    let users = vec![
        user("admin@docflow.local", "Super Admin", UserRole::Admin, None),
        user("alice@docflow.local", "Alice Silva", UserRole::TechLeader, Some(substation.id)),
        user("bob@docflow.local", "Bob Santos", UserRole::Designer, Some(substation.id)),
        user("carol@client.local", "Carol Client", UserRole::Client, Some(substation.id)),
        user("dave@docflow.local", "Dave Reader", UserRole::Reader, Some(line.id)),
    ];

    let alice = ("Alice Silva", UserRole::TechLeader);
    let bob = ("Bob Santos", UserRole::Designer);
    let carol = ("Carol Client", UserRole::Client);
    let system = ("System (auto)", UserRole::Admin);

    let seeds = vec![
        Seed {
            project: substation.id,
            code: "XV-EL-001",
            title: "Single-line diagram, substation A",
            doc_type: DocumentType::Technical,
            discipline: "Electrical - EL",
            nature: "Functional / Logic Diagram - DFL",
            issuer: "Internal Engineering",
            forecast_in_days: Some(3),
            ge_code: Some("GE-001-X"),
            steps: vec![
                Step::new(12, "0A", S::Draft, Q::None, bob, "Document created.", K::Created),
                Step::new(8, "0A", S::EvaluationLt, Q::None, bob, "Ready for evaluation.", K::Transition),
                Step::new(5, "0A", S::AnalysisClient, Q::Approved, alice, "Issued for client approval.", K::Transition),
            ],
        },
        Seed {
            project: substation.id,
            code: "XV-CV-015",
            title: "Transformer T1 concrete base",
            doc_type: DocumentType::Technical,
            discipline: "Civil - CV",
            nature: "Construction / Survey Diagram - DCT",
            issuer: "Internal Engineering",
            forecast_in_days: Some(-2),
            ge_code: None,
            steps: vec![
                Step::new(30, "0A", S::Draft, Q::None, bob, "Document created.", K::Created),
                Step::new(25, "0A", S::EvaluationLt, Q::None, bob, "Ready for evaluation.", K::Transition),
                Step::new(22, "0A", S::AnalysisClient, Q::Approved, alice, "Issued for client approval.", K::Transition),
                Step::new(15, "0A", S::ModerationLt, Q::Rejected, carol, "Reinforce the footing rebar.", K::Transition),
                Step::new(14, "0A", S::InReview, Q::None, alice, "Address client comments.", K::Transition),
                Step::new(6, "0B", S::InReview, Q::None, bob, "New revision issued.", K::Reissue),
                Step::new(4, "0B", S::EvaluationLt, Q::None, bob, "Adjusted as requested.", K::Transition),
            ],
        },
        Seed {
            project: substation.id,
            code: "XV-EM-099",
            title: "General mechanical arrangement",
            doc_type: DocumentType::Managerial,
            discipline: "Electromechanical - EM",
            nature: "Construction / Survey Diagram - DCT",
            issuer: "Supplier A",
            forecast_in_days: None,
            ge_code: None,
            steps: vec![
                Step::new(40, "01", S::Draft, Q::None, alice, "Document created.", K::Created),
                Step::new(35, "01", S::EvaluationLt, Q::None, bob, "Ready for evaluation.", K::Transition),
                Step::new(33, "01", S::AnalysisClient, Q::Approved, alice, "Issued for client approval.", K::Transition),
                Step::new(28, "01", S::Execution, Q::Approved, carol, "Approved for execution.", K::Transition),
            ],
        },
        Seed {
            project: substation.id,
            code: "XV-MG-002",
            title: "Quality plan",
            doc_type: DocumentType::Managerial,
            discipline: "Management - MG",
            nature: "Quality Plan - PQ",
            issuer: "Consortium",
            forecast_in_days: Some(10),
            ge_code: None,
            steps: vec![
                Step::new(3, "01", S::Draft, Q::None, alice, "Document created.", K::Created),
                Step::new(2, "01", S::InReview, Q::None, alice, "Sent to designer.", K::Transition),
            ],
        },
        Seed {
            project: substation.id,
            code: "GRD-0045",
            title: "Transmittal - XV-EL-001",
            doc_type: DocumentType::Transmittal,
            discipline: "Management - MG",
            nature: "GRD",
            issuer: "Alice Silva",
            forecast_in_days: None,
            ge_code: None,
            steps: vec![Step::new(
                5,
                "00",
                S::AnalysisClient,
                Q::None,
                system,
                "Generated automatically.",
                K::Generated,
            )],
        },
        Seed {
            project: line.id,
            code: "LTN-CV-001",
            title: "Basic line route",
            doc_type: DocumentType::Technical,
            discipline: "Civil - CV",
            nature: "Construction / Survey Diagram - DCT",
            issuer: "Internal Engineering",
            forecast_in_days: Some(20),
            ge_code: None,
            steps: vec![Step::new(1, "0A", S::Draft, Q::None, alice, "Document created.", K::Created)],
        },
    ];

    let mut documents = Vec::with_capacity(seeds.len());
    for seed in seeds {
        documents.push(seed.build(now)?);
    }

    Ok(Snapshot {
        projects: vec![substation, line],
        users,
        documents,
        catalog,
        events: Vec::new(),
    })
}
