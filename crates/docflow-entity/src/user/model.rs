//! User entity model.

use serde::{Deserialize, Serialize};
use validator::Validate;

use docflow_core::traits::Identifiable;
use docflow_core::types::{ProjectId, UserId};

use super::role::{RoleSet, UserRole};

/// A user of the workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique email address.
    pub email: String,
    /// Display name, stamped on version records.
    pub name: String,
    /// Roles held (non-empty).
    pub roles: RoleSet,
    /// Project the user is scoped to; `None` means global access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
}

impl User {
    /// Check if the user holds `role`.
    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.contains(role)
    }

    /// Check if the user may access every project.
    pub fn is_global(&self) -> bool {
        self.project_id.is_none()
    }
}

impl Identifiable for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    /// Display name.
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub name: String,
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Roles to grant.
    pub roles: RoleSet,
    /// Project scope; ignored for administrators, who are always global.
    #[serde(default)]
    pub project_id: Option<ProjectId>,
}
