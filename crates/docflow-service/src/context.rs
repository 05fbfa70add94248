//! Actor context carrying the acting user into every operation.

use serde::{Deserialize, Serialize};

use docflow_auth::ProjectScope;
use docflow_core::types::{ProjectId, UserId};
use docflow_entity::user::{RoleSet, User, UserRole};

/// Who is acting.
///
/// Passed explicitly into engines and services so that no operation reads
/// ambient session state. The name and primary role are what version
/// records are stamped with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorContext {
    /// The acting user's ID.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Roles held.
    pub roles: RoleSet,
    /// Project scope; `None` for global users.
    pub project_id: Option<ProjectId>,
}

impl ActorContext {
    /// Creates a new actor context.
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        roles: RoleSet,
        project_id: Option<ProjectId>,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            roles,
            project_id,
        }
    }

    /// Builds the context for a stored user.
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            name: user.name.clone(),
            roles: user.roles.clone(),
            project_id: user.project_id,
        }
    }

    /// The role stamped on version records.
    pub fn primary_role(&self) -> UserRole {
        self.roles.primary()
    }

    /// Returns whether the actor is an administrator.
    pub fn is_admin(&self) -> bool {
        self.roles.contains(UserRole::Admin)
    }

    /// Returns whether the actor is an administrator or tech leader.
    pub fn is_manager(&self) -> bool {
        self.roles.is_manager()
    }

    /// The projects and history entries visible to the actor.
    pub fn scope(&self) -> ProjectScope {
        ProjectScope::new(self.project_id, self.roles.clone())
    }
}
