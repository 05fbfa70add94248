//! Project and user administration.

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use docflow_auth::WorkflowEnforcer;
use docflow_core::error::AppError;
use docflow_core::traits::Repository;
use docflow_core::types::{ProjectId, UserId};
use docflow_entity::project::{CreateProject, Project};
use docflow_entity::user::{CreateUser, User, UserRole};

use crate::context::ActorContext;

/// Handles project creation and user management.
#[derive(Clone)]
pub struct AdminService {
    /// Project store.
    projects: Arc<dyn Repository<Project>>,
    /// User store.
    users: Arc<dyn Repository<User>>,
    /// Role checks.
    enforcer: Arc<WorkflowEnforcer>,
}

impl std::fmt::Debug for AdminService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminService").finish_non_exhaustive()
    }
}

impl AdminService {
    /// Creates a new admin service.
    pub fn new(
        projects: Arc<dyn Repository<Project>>,
        users: Arc<dyn Repository<User>>,
        enforcer: Arc<WorkflowEnforcer>,
    ) -> Self {
        Self {
            projects,
            users,
            enforcer,
        }
    }

    /// Projects in the actor's scope, ordered by code.
    pub async fn list_projects(&self, actor: &ActorContext) -> Result<Vec<Project>, AppError> {
        let scope = actor.scope();
        let mut projects: Vec<Project> = self
            .projects
            .find_all()
            .await?
            .into_iter()
            .filter(|p| scope.allows(p.id))
            .collect();
        projects.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(projects)
    }

    /// Creates a project. Admin only; the code must be unique.
    pub async fn create_project(
        &self,
        actor: &ActorContext,
        payload: CreateProject,
    ) -> Result<Project, AppError> {
        self.enforcer.require_admin(&actor.roles, "create projects")?;
        payload.validate()?;

        let project = payload.into_project();
        let existing = self.projects.find_all().await?;
        if existing
            .iter()
            .any(|p| p.code.eq_ignore_ascii_case(&project.code))
        {
            return Err(AppError::conflict(format!(
                "Project code '{}' is already in use",
                project.code
            )));
        }

        self.projects.save(&project).await?;
        info!(project_id = %project.id, code = %project.code, actor = %actor.user_id, "Project created");
        Ok(project)
    }

    /// Users visible to the actor, ordered by email.
    ///
    /// Scoped managers see the users of their project only.
    pub async fn list_users(&self, actor: &ActorContext) -> Result<Vec<User>, AppError> {
        self.enforcer.require_manager(&actor.roles, "list users")?;
        let mut users: Vec<User> = self
            .users
            .find_all()
            .await?
            .into_iter()
            .filter(|u| actor.project_id.is_none() || u.project_id == actor.project_id)
            .collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    /// Look up a user by email, ignoring case.
    pub async fn find_user_by_email(&self, email: &str) -> Result<User, AppError> {
        let email = email.trim();
        self.users
            .find_all()
            .await?
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .ok_or_else(|| AppError::not_found(format!("No user with email '{email}'")))
    }

    /// Creates a user.
    ///
    /// Administrators and tech leaders may create users. Users holding the
    /// ADMIN role are always global; a scoped tech leader can only create
    /// users in their own project.
    pub async fn create_user(
        &self,
        actor: &ActorContext,
        payload: CreateUser,
    ) -> Result<User, AppError> {
        self.enforcer.require_manager(&actor.roles, "create users")?;
        payload.validate()?;

        if payload.roles.contains(UserRole::Admin) && !actor.is_admin() {
            return Err(AppError::authorization(
                "Only administrators may grant the ADMIN role",
            ));
        }

        let project_id = if payload.roles.contains(UserRole::Admin) {
            None
        } else {
            match (actor.project_id, payload.project_id) {
                (Some(own), Some(requested)) if own != requested => {
                    return Err(AppError::authorization(
                        "Tech leaders can only create users in their own project",
                    ));
                }
                (Some(own), _) => Some(own),
                (None, requested) => requested,
            }
        };
        if let Some(id) = project_id {
            self.require_project(id).await?;
        }

        let email = payload.email.trim().to_lowercase();
        let users = self.users.find_all().await?;
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
            return Err(AppError::conflict(format!(
                "Email '{email}' is already in use"
            )));
        }

        let user = User {
            id: UserId::new(),
            email,
            name: payload.name.trim().to_string(),
            roles: payload.roles,
            project_id,
        };
        self.users.save(&user).await?;

        info!(user_id = %user.id, roles = %user.roles, actor = %actor.user_id, "User created");
        Ok(user)
    }

    /// Grant `role` if the user lacks it, revoke it otherwise.
    ///
    /// Revoking a user's last role fails with `Validation`.
    pub async fn toggle_role(
        &self,
        actor: &ActorContext,
        user_id: UserId,
        role: UserRole,
    ) -> Result<User, AppError> {
        self.enforcer.require_manager(&actor.roles, "change user roles")?;
        if role == UserRole::Admin && !actor.is_admin() {
            return Err(AppError::authorization(
                "Only administrators may grant or revoke the ADMIN role",
            ));
        }

        let mut user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;
        if actor.project_id.is_some() && user.project_id != actor.project_id {
            return Err(AppError::authorization(
                "User is outside the caller's project",
            ));
        }

        user.roles.toggle(role)?;
        if user.roles.contains(UserRole::Admin) {
            user.project_id = None;
        }
        self.users.save(&user).await?;

        info!(user_id = %user.id, role = %role, roles = %user.roles, "User roles changed");
        Ok(user)
    }

    async fn require_project(&self, id: ProjectId) -> Result<Project, AppError> {
        self.projects
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }
}
