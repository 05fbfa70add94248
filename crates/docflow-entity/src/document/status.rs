//! Workflow status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The coarse lifecycle stage of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStatus {
    /// Registered, not yet circulated.
    Draft,
    /// Internal revision by the designer.
    InReview,
    /// Waiting for the technical leader's evaluation.
    EvaluationLt,
    /// Sent to the client for analysis.
    AnalysisClient,
    /// Client verdict returned; technical leader moderates it.
    ModerationLt,
    /// Released for execution.
    Execution,
    /// Final as-built record.
    AsBuilt,
    /// Archived.
    Archived,
    /// Cancelled.
    Cancelled,
}

impl WorkflowStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [WorkflowStatus; 9] = [
        Self::Draft,
        Self::InReview,
        Self::EvaluationLt,
        Self::AnalysisClient,
        Self::ModerationLt,
        Self::Execution,
        Self::AsBuilt,
        Self::Archived,
        Self::Cancelled,
    ];

    /// Return the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::InReview => "IN_REVIEW",
            Self::EvaluationLt => "EVALUATION_LT",
            Self::AnalysisClient => "ANALYSIS_CLIENT",
            Self::ModerationLt => "MODERATION_LT",
            Self::Execution => "EXECUTION",
            Self::AsBuilt => "AS_BUILT",
            Self::Archived => "ARCHIVED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::InReview => "In Review",
            Self::EvaluationLt => "Evaluation (LT)",
            Self::AnalysisClient => "Client Analysis",
            Self::ModerationLt => "LT Moderation",
            Self::Execution => "Execution",
            Self::AsBuilt => "As Built",
            Self::Archived => "Archived",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Whether the document has left the active lifecycle.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::AsBuilt | Self::Archived | Self::Cancelled)
    }

    /// Internal stages hidden from client-only users.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Draft | Self::InReview | Self::EvaluationLt)
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WorkflowStatus {
    type Err = docflow_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                docflow_core::AppError::validation(format!("Invalid workflow status: '{s}'"))
            })
    }
}
