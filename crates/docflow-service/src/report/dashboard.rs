//! Dashboard summary of a document set.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use docflow_core::config::workflow::WorkflowConfig;
use docflow_core::error::AppError;
use docflow_core::traits::Repository;
use docflow_core::types::{DocumentId, ProjectId};
use docflow_entity::document::{Document, WorkflowStatus};
use docflow_entity::user::{RoleSet, UserRole};

use crate::context::ActorContext;

/// Statuses that make up each role's work queue.
const TASK_QUEUES: &[(UserRole, &[WorkflowStatus])] = &[
    (
        UserRole::Designer,
        &[WorkflowStatus::Draft, WorkflowStatus::InReview],
    ),
    (
        UserRole::TechLeader,
        &[WorkflowStatus::EvaluationLt, WorkflowStatus::ModerationLt],
    ),
    (UserRole::Client, &[WorkflowStatus::AnalysisClient]),
];

/// Number of documents in one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    /// The status.
    pub status: WorkflowStatus,
    /// Documents currently in it.
    pub count: usize,
}

/// A document with a deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineItem {
    /// The document.
    pub document_id: DocumentId,
    /// Its code.
    pub code: String,
    /// Its title.
    pub title: String,
    /// Current status.
    pub status: WorkflowStatus,
    /// The deadline.
    pub forecast_date: NaiveDate,
    /// Days left; negative when overdue.
    pub days_left: i64,
}

/// Headline numbers for a user's view of a document set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Reference date.
    pub today: NaiveDate,
    /// All documents.
    pub total: usize,
    /// Documents not yet as-built, archived or cancelled.
    pub in_progress: usize,
    /// Documents waiting for the client.
    pub pending_client: usize,
    /// Documents in execution or as-built.
    pub execution: usize,
    /// Cancelled documents.
    pub cancelled: usize,
    /// Documents per status, in lifecycle order.
    pub by_status: Vec<StatusCount>,
    /// Documents waiting on one of the user's roles.
    pub my_tasks: usize,
    /// Active documents past their deadline, most overdue first.
    pub overdue: Vec<DeadlineItem>,
    /// Active documents due within the window, soonest first.
    pub upcoming: Vec<DeadlineItem>,
}

impl DashboardReport {
    /// Summarize `docs` for a holder of `roles` on `today`.
    pub fn build(docs: &[Document], roles: &RoleSet, today: NaiveDate, window_days: u32) -> Self {
        let count = |pred: &dyn Fn(&Document) -> bool| docs.iter().filter(|d| pred(d)).count();

        let by_status = WorkflowStatus::ALL
            .iter()
            .map(|&status| StatusCount {
                status,
                count: count(&|d| d.current_status == status),
            })
            .collect();

        let queue: Vec<WorkflowStatus> = TASK_QUEUES
            .iter()
            .filter(|(role, _)| roles.contains(*role))
            .flat_map(|(_, statuses)| statuses.iter().copied())
            .collect();

        let mut overdue = Vec::new();
        let mut upcoming = Vec::new();
        for doc in docs.iter().filter(|d| !d.current_status.is_closed()) {
            let (Some(forecast_date), Some(days_left)) =
                (doc.forecast_date, doc.days_until_deadline(today))
            else {
                continue;
            };
            let item = DeadlineItem {
                document_id: doc.id,
                code: doc.code.clone(),
                title: doc.title.clone(),
                status: doc.current_status,
                forecast_date,
                days_left,
            };
            if days_left < 0 {
                overdue.push(item);
            } else if days_left <= i64::from(window_days) {
                upcoming.push(item);
            }
        }
        overdue.sort_by_key(|i| i.days_left);
        upcoming.sort_by_key(|i| i.days_left);

        Self {
            today,
            total: docs.len(),
            in_progress: count(&|d| !d.current_status.is_closed()),
            pending_client: count(&|d| d.current_status == WorkflowStatus::AnalysisClient),
            execution: count(&|d| {
                matches!(
                    d.current_status,
                    WorkflowStatus::Execution | WorkflowStatus::AsBuilt
                )
            }),
            cancelled: count(&|d| d.current_status == WorkflowStatus::Cancelled),
            by_status,
            my_tasks: count(&|d| queue.contains(&d.current_status)),
            overdue,
            upcoming,
        }
    }
}

/// Builds dashboards from the document store.
#[derive(Clone)]
pub struct DashboardService {
    /// Document store.
    documents: Arc<dyn Repository<Document>>,
    /// Upcoming window.
    config: Arc<WorkflowConfig>,
}

impl std::fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DashboardService {
    /// Creates a new dashboard service.
    pub fn new(documents: Arc<dyn Repository<Document>>, config: Arc<WorkflowConfig>) -> Self {
        Self { documents, config }
    }

    /// Dashboard over the actor's documents, optionally one project only.
    pub async fn build(
        &self,
        actor: &ActorContext,
        project_id: Option<ProjectId>,
        today: NaiveDate,
    ) -> Result<DashboardReport, AppError> {
        let scope = actor.scope();
        if let Some(project) = project_id {
            scope.require(project)?;
        }
        let docs: Vec<Document> = self
            .documents
            .find_all()
            .await?
            .into_iter()
            .filter(|d| scope.allows(d.project_id))
            .filter(|d| project_id.is_none_or(|p| p == d.project_id))
            .collect();
        Ok(DashboardReport::build(
            &docs,
            &actor.roles,
            today,
            self.config.upcoming_window_days,
        ))
    }
}
