//! Workflow enforcement: which actions a user may take on which documents.

use tracing::warn;

use docflow_core::error::AppError;
use docflow_entity::document::{Document, Qualification, WorkflowStatus};
use docflow_entity::user::{RoleSet, UserRole};

use super::policies::{WorkflowAction, WorkflowPolicies};

/// Roles allowed to issue a new revision label.
const REISSUE_ROLES: &[UserRole] = &[UserRole::Designer, UserRole::TechLeader, UserRole::Admin];

/// Enforces the workflow rule table for single and batch transitions.
#[derive(Debug, Clone)]
pub struct WorkflowEnforcer {
    /// The rule table.
    policies: WorkflowPolicies,
}

impl WorkflowEnforcer {
    /// Creates a new enforcer with the default rule table.
    pub fn new() -> Self {
        Self {
            policies: WorkflowPolicies::new(),
        }
    }

    /// Creates an enforcer with a custom rule table.
    pub fn with_policies(policies: WorkflowPolicies) -> Self {
        Self { policies }
    }

    /// Returns a reference to the underlying rule table.
    pub fn policies(&self) -> &WorkflowPolicies {
        &self.policies
    }

    /// Legal actions for a holder of `roles` on `doc`, in table order.
    ///
    /// Rules are evaluated independently and concatenated; an action
    /// granted by two roles appears once.
    pub fn legal_actions(&self, roles: &RoleSet, doc: &Document) -> Vec<WorkflowAction> {
        let mut actions: Vec<WorkflowAction> = Vec::new();
        for rule in self.policies.rules() {
            if !rule.applies(roles.iter(), doc) {
                continue;
            }
            let action = rule.action;
            if !actions
                .iter()
                .any(|a| a.is(action.target_status, action.target_qualification))
            {
                actions.push(action);
            }
        }
        actions
    }

    /// Whether `(status, qualification)` is a legal action on `doc`.
    pub fn is_legal(
        &self,
        roles: &RoleSet,
        doc: &Document,
        status: WorkflowStatus,
        qualification: Qualification,
    ) -> bool {
        self.legal_actions(roles, doc)
            .iter()
            .any(|a| a.is(status, qualification))
    }

    /// Re-derives the legal actions and returns the matching one.
    pub fn require_transition(
        &self,
        roles: &RoleSet,
        doc: &Document,
        status: WorkflowStatus,
        qualification: Qualification,
    ) -> Result<WorkflowAction, AppError> {
        self.legal_actions(roles, doc)
            .into_iter()
            .find(|a| a.is(status, qualification))
            .ok_or_else(|| {
                warn!(
                    document_id = %doc.id,
                    from = %doc.current_status,
                    to = %status,
                    qualification = %qualification,
                    "Rejected transition"
                );
                AppError::invalid_transition(format!(
                    "Action {status}/{qualification} is not available for document '{}' in status {} to roles [{roles}]",
                    doc.code, doc.current_status
                ))
            })
    }

    /// The status shared by every document of a batch.
    pub fn common_status(&self, docs: &[Document]) -> Result<WorkflowStatus, AppError> {
        let first = docs
            .first()
            .ok_or_else(|| AppError::validation("A batch must contain at least one document"))?;
        let status = first.current_status;
        if let Some(other) = docs.iter().find(|d| d.current_status != status) {
            return Err(AppError::mixed_batch_status(format!(
                "Selected documents span more than one status ({status} and {}); select documents with the same status",
                other.current_status
            )));
        }
        Ok(status)
    }

    /// Actions legal on every document of a homogeneous batch.
    ///
    /// The client approval target depends on each document's label, so the
    /// result is the intersection over the batch rather than the rule set
    /// for the shared status alone.
    pub fn batch_actions(
        &self,
        roles: &RoleSet,
        docs: &[Document],
    ) -> Result<Vec<WorkflowAction>, AppError> {
        self.common_status(docs)?;
        let mut docs_iter = docs.iter();
        let mut actions = match docs_iter.next() {
            Some(first) => self.legal_actions(roles, first),
            None => Vec::new(),
        };
        for doc in docs_iter {
            let allowed = self.legal_actions(roles, doc);
            actions.retain(|a| {
                allowed
                    .iter()
                    .any(|b| b.is(a.target_status, a.target_qualification))
            });
        }
        Ok(actions)
    }

    /// Checks a batch before anything is applied: one shared status, and
    /// the action legal on every document.
    pub fn authorize_batch(
        &self,
        roles: &RoleSet,
        docs: &[Document],
        status: WorkflowStatus,
        qualification: Qualification,
    ) -> Result<(), AppError> {
        self.common_status(docs)?;
        for doc in docs {
            self.require_transition(roles, doc, status, qualification)?;
        }
        Ok(())
    }

    /// Whether a holder of `roles` may issue a new revision of `doc`.
    pub fn can_reissue(&self, roles: &RoleSet, doc: &Document) -> bool {
        !doc.is_transmittal()
            && matches!(
                doc.current_status,
                WorkflowStatus::Draft | WorkflowStatus::InReview
            )
            && roles.contains_any(REISSUE_ROLES)
    }

    /// Fails with `InvalidTransition` unless a re-issue is allowed.
    pub fn require_reissue(&self, roles: &RoleSet, doc: &Document) -> Result<(), AppError> {
        if self.can_reissue(roles, doc) {
            Ok(())
        } else {
            Err(AppError::invalid_transition(format!(
                "A new revision of '{}' cannot be issued in status {} by roles [{roles}]",
                doc.code, doc.current_status
            )))
        }
    }

    /// Fails with `Authorization` unless the holder is ADMIN or TECH_LEADER.
    pub fn require_manager(&self, roles: &RoleSet, operation: &str) -> Result<(), AppError> {
        if roles.is_manager() {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Only administrators and tech leaders may {operation}"
            )))
        }
    }

    /// Fails with `Authorization` unless the holder is ADMIN.
    pub fn require_admin(&self, roles: &RoleSet, operation: &str) -> Result<(), AppError> {
        if roles.contains(UserRole::Admin) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Only administrators may {operation}"
            )))
        }
    }
}

impl Default for WorkflowEnforcer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use docflow_core::error::ErrorKind;
    use docflow_core::types::{DocumentId, ProjectId};
    use docflow_entity::document::{DocumentType, VersionLabel};

    fn doc(status: WorkflowStatus, version: &str) -> Document {
        Document {
            id: DocumentId::new(),
            project_id: ProjectId::new(),
            code: "EL-001".to_string(),
            title: "Single-line diagram".to_string(),
            doc_type: DocumentType::Technical,
            discipline: "Electrical - EL".to_string(),
            nature: "Cable List - LC".to_string(),
            issuer: "Internal Engineering".to_string(),
            current_version: VersionLabel::parse(version).unwrap(),
            current_status: status,
            current_qualification: Qualification::None,
            is_locked: false,
            versions: Vec::new(),
            last_modified: Utc::now(),
            forecast_date: None,
            informative: false,
            as_built: false,
            taf_tac: None,
            ge_code: None,
            access_code: None,
        }
    }

    fn roles(list: &[UserRole]) -> RoleSet {
        RoleSet::new(list.iter().copied()).unwrap()
    }

    fn pairs(actions: &[WorkflowAction]) -> Vec<(WorkflowStatus, Qualification)> {
        actions
            .iter()
            .map(|a| (a.target_status, a.target_qualification))
            .collect()
    }

    #[test]
    fn test_manager_actions_on_evaluation() {
        let enforcer = WorkflowEnforcer::new();
        let actions = enforcer.legal_actions(
            &roles(&[UserRole::TechLeader]),
            &doc(WorkflowStatus::EvaluationLt, "0A"),
        );
        assert_eq!(
            pairs(&actions),
            vec![
                (WorkflowStatus::AnalysisClient, Qualification::Approved),
                (WorkflowStatus::InReview, Qualification::Rejected),
                (WorkflowStatus::Cancelled, Qualification::Cancelled),
            ]
        );
    }

    #[test]
    fn test_client_approval_depends_on_label() {
        let enforcer = WorkflowEnforcer::new();
        let client = roles(&[UserRole::Client]);

        let alpha = enforcer.legal_actions(&client, &doc(WorkflowStatus::AnalysisClient, "0B"));
        assert_eq!(alpha[0].target_status, WorkflowStatus::ModerationLt);
        assert_eq!(alpha.len(), 3);
        assert!(!alpha.iter().any(|a| a.target_status == WorkflowStatus::AsBuilt));

        let numeric = enforcer.legal_actions(&client, &doc(WorkflowStatus::AnalysisClient, "01"));
        assert_eq!(numeric[0].target_status, WorkflowStatus::Execution);
        assert_eq!(numeric[0].target_qualification, Qualification::Approved);
        assert!(numeric.iter().any(|a| a.is(WorkflowStatus::AsBuilt, Qualification::AsBuilt)));
        assert_eq!(numeric.len(), 4);
    }

    #[test]
    fn test_roles_are_unioned() {
        let enforcer = WorkflowEnforcer::new();
        let actions = enforcer.legal_actions(
            &roles(&[UserRole::Designer, UserRole::Admin]),
            &doc(WorkflowStatus::Draft, "0A"),
        );
        assert_eq!(
            pairs(&actions),
            vec![
                (WorkflowStatus::InReview, Qualification::None),
                (WorkflowStatus::EvaluationLt, Qualification::None),
            ]
        );
    }

    #[test]
    fn test_unlisted_combinations_yield_nothing() {
        let enforcer = WorkflowEnforcer::new();
        for status in WorkflowStatus::ALL {
            let d = doc(status, "01");
            assert!(enforcer.legal_actions(&roles(&[UserRole::Reader]), &d).is_empty());
            for qualification in Qualification::ALL {
                let err = enforcer
                    .require_transition(&roles(&[UserRole::Reader]), &d, status, qualification)
                    .unwrap_err();
                assert_eq!(err.kind, ErrorKind::InvalidTransition);
            }
        }
        for status in [
            WorkflowStatus::AnalysisClient,
            WorkflowStatus::AsBuilt,
            WorkflowStatus::Archived,
            WorkflowStatus::Cancelled,
        ] {
            let managers = roles(&[UserRole::Admin, UserRole::TechLeader]);
            assert!(enforcer.legal_actions(&managers, &doc(status, "0A")).is_empty());
        }
        assert!(
            enforcer
                .legal_actions(&roles(&[UserRole::Designer]), &doc(WorkflowStatus::Execution, "0A"))
                .is_empty()
        );
    }

    #[test]
    fn test_mixed_batch_is_rejected() {
        let enforcer = WorkflowEnforcer::new();
        let docs = vec![
            doc(WorkflowStatus::Draft, "0A"),
            doc(WorkflowStatus::EvaluationLt, "0A"),
        ];
        let err = enforcer
            .authorize_batch(
                &roles(&[UserRole::Admin]),
                &docs,
                WorkflowStatus::InReview,
                Qualification::None,
            )
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MixedBatchStatus);
        assert_eq!(
            enforcer.common_status(&[]).unwrap_err().kind,
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_batch_actions_intersect_client_branches() {
        let enforcer = WorkflowEnforcer::new();
        let docs = vec![
            doc(WorkflowStatus::AnalysisClient, "0B"),
            doc(WorkflowStatus::AnalysisClient, "01"),
        ];
        let actions = enforcer
            .batch_actions(&roles(&[UserRole::Client]), &docs)
            .unwrap();
        assert_eq!(
            pairs(&actions),
            vec![
                (WorkflowStatus::ModerationLt, Qualification::ApprovedWithComments),
                (WorkflowStatus::ModerationLt, Qualification::Rejected),
            ]
        );
    }

    #[test]
    fn test_reissue_and_manager_gates() {
        let enforcer = WorkflowEnforcer::new();
        let designer = roles(&[UserRole::Designer]);
        assert!(enforcer.can_reissue(&designer, &doc(WorkflowStatus::InReview, "0A")));
        assert!(!enforcer.can_reissue(&designer, &doc(WorkflowStatus::EvaluationLt, "0A")));
        assert!(!enforcer.can_reissue(&roles(&[UserRole::Client]), &doc(WorkflowStatus::Draft, "0A")));

        assert!(enforcer.require_manager(&designer, "edit metadata").is_err());
        assert!(enforcer.require_manager(&roles(&[UserRole::TechLeader]), "edit metadata").is_ok());
        let err = enforcer
            .require_admin(&roles(&[UserRole::TechLeader]), "create projects")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}
