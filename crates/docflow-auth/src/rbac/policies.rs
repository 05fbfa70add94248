//! Declarative workflow rule table.
//!
//! Each rule grants one action to holders of any of its roles while a
//! document sits in the rule's status. A user's legal actions are the
//! concatenation of every matching rule, in table order.

use serde::Serialize;

use docflow_entity::document::{Document, Qualification, VersionLabel, WorkflowStatus};
use docflow_entity::user::UserRole;

const MANAGERS: &[UserRole] = &[UserRole::Admin, UserRole::TechLeader];
const CLIENTS: &[UserRole] = &[UserRole::Client];
const DESIGNERS: &[UserRole] = &[UserRole::Designer];

/// A workflow action offered to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkflowAction {
    /// Status the document moves to.
    pub target_status: WorkflowStatus,
    /// Qualification recorded with the move.
    pub target_qualification: Qualification,
    /// Short human-readable label.
    pub label: &'static str,
}

impl WorkflowAction {
    /// Whether this action is the `(status, qualification)` pair.
    pub fn is(&self, status: WorkflowStatus, qualification: Qualification) -> bool {
        self.target_status == status && self.target_qualification == qualification
    }
}

/// Condition on the document's current version label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionGuard {
    /// Any label.
    Any,
    /// Purely numeric labels ("00", "01").
    Numeric,
    /// Labels with at least one letter ("0A", "0B").
    NonNumeric,
}

impl VersionGuard {
    /// Whether `label` satisfies the guard.
    pub fn admits(&self, label: &VersionLabel) -> bool {
        match self {
            Self::Any => true,
            Self::Numeric => label.is_numeric(),
            Self::NonNumeric => !label.is_numeric(),
        }
    }
}

/// One row of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct PolicyRule {
    /// Roles the rule applies to; holding any one is enough.
    pub roles: &'static [UserRole],
    /// Status the document must be in.
    pub from: WorkflowStatus,
    /// Condition on the version label.
    pub guard: VersionGuard,
    /// The granted action.
    pub action: WorkflowAction,
}

impl PolicyRule {
    const fn new(
        roles: &'static [UserRole],
        from: WorkflowStatus,
        guard: VersionGuard,
        target_status: WorkflowStatus,
        target_qualification: Qualification,
        label: &'static str,
    ) -> Self {
        Self {
            roles,
            from,
            guard,
            action: WorkflowAction {
                target_status,
                target_qualification,
                label,
            },
        }
    }

    /// Whether the rule fires for a holder of `roles` on `doc`.
    pub fn applies(&self, mut roles: impl Iterator<Item = UserRole>, doc: &Document) -> bool {
        self.from == doc.current_status
            && self.guard.admits(&doc.current_version)
            && roles.any(|r| self.roles.contains(&r))
    }
}

/// The workflow rule table.
#[derive(Debug, Clone)]
pub struct WorkflowPolicies {
    rules: Vec<PolicyRule>,
}

impl WorkflowPolicies {
    /// Creates the default rule table.
    pub fn new() -> Self {
        use Qualification as Q;
        use VersionGuard::{Any, NonNumeric, Numeric};
        use WorkflowStatus as S;

        #[rustfmt::skip]
        let rules = vec![
            // Tech leaders and administrators
            PolicyRule::new(MANAGERS, S::EvaluationLt, Any, S::AnalysisClient, Q::Approved, "Approve (issue to client)"),
            PolicyRule::new(MANAGERS, S::EvaluationLt, Any, S::InReview, Q::Rejected, "Reject (return)"),
            PolicyRule::new(MANAGERS, S::EvaluationLt, Any, S::Cancelled, Q::Cancelled, "Cancel document"),
            PolicyRule::new(MANAGERS, S::ModerationLt, Any, S::InReview, Q::None, "Send for revision"),
            PolicyRule::new(MANAGERS, S::ModerationLt, Any, S::Execution, Q::Approved, "Release for execution"),
            PolicyRule::new(MANAGERS, S::Draft, Any, S::InReview, Q::None, "Send to designer"),
            PolicyRule::new(MANAGERS, S::Execution, Any, S::InReview, Q::None, "Return for revision"),
            // Client
            PolicyRule::new(CLIENTS, S::AnalysisClient, Numeric, S::Execution, Q::Approved, "Approve"),
            PolicyRule::new(CLIENTS, S::AnalysisClient, NonNumeric, S::ModerationLt, Q::Approved, "Approve"),
            PolicyRule::new(CLIENTS, S::AnalysisClient, Any, S::ModerationLt, Q::ApprovedWithComments, "Approve with comments"),
            PolicyRule::new(CLIENTS, S::AnalysisClient, Any, S::ModerationLt, Q::Rejected, "Reject"),
            PolicyRule::new(CLIENTS, S::AnalysisClient, Numeric, S::AsBuilt, Q::AsBuilt, "As built"),
            // Designer
            PolicyRule::new(DESIGNERS, S::InReview, Any, S::EvaluationLt, Q::None, "Submit for evaluation"),
            PolicyRule::new(DESIGNERS, S::Draft, Any, S::EvaluationLt, Q::None, "Submit for evaluation"),
        ];

        Self { rules }
    }

    /// Creates a table from custom rules.
    pub fn with_rules(rules: Vec<PolicyRule>) -> Self {
        Self { rules }
    }

    /// The rules, in evaluation order.
    pub fn rules(&self) -> &[PolicyRule] {
        &self.rules
    }
}

impl Default for WorkflowPolicies {
    fn default() -> Self {
        Self::new()
    }
}
