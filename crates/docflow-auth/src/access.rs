//! Project scope and history visibility.

use docflow_core::error::AppError;
use docflow_core::types::ProjectId;
use docflow_entity::document::{Document, DocumentVersion};
use docflow_entity::user::{RoleSet, UserRole};

/// What a user may read: the projects in reach and, for clients, which
/// history entries.
#[derive(Debug, Clone)]
pub struct ProjectScope {
    /// Assigned project; `None` grants every project.
    project_id: Option<ProjectId>,
    /// Roles held.
    roles: RoleSet,
}

impl ProjectScope {
    /// Creates a scope for a user.
    pub fn new(project_id: Option<ProjectId>, roles: RoleSet) -> Self {
        Self { project_id, roles }
    }

    /// Whether every project is in reach.
    pub fn is_global(&self) -> bool {
        self.project_id.is_none()
    }

    /// Whether `project` is in reach.
    pub fn allows(&self, project: ProjectId) -> bool {
        self.project_id.is_none_or(|own| own == project)
    }

    /// Fails with `Authorization` when `project` is out of reach.
    pub fn require(&self, project: ProjectId) -> Result<(), AppError> {
        if self.allows(project) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Project {project} is outside the caller's scope"
            )))
        }
    }

    /// Whether the user sees entries recorded while a document was still
    /// internal (DRAFT, IN_REVIEW, EVALUATION_LT).
    pub fn sees_internal_history(&self) -> bool {
        !self.roles.contains(UserRole::Client) || self.roles.is_manager()
    }

    /// Whether a single history entry is visible.
    pub fn can_see(&self, entry: &DocumentVersion) -> bool {
        self.sees_internal_history() || !entry.status.is_internal()
    }

    /// The visible part of a document's history, newest first.
    pub fn visible_versions<'d>(&self, doc: &'d Document) -> Vec<&'d DocumentVersion> {
        doc.versions.iter().filter(|v| self.can_see(v)).collect()
    }

    /// A copy of `doc` with hidden history entries removed, for display.
    pub fn redact(&self, doc: &Document) -> Document {
        let mut view = doc.clone();
        view.versions.retain(|v| self.can_see(v));
        view
    }
}
