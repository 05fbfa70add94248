//! Administration commands: projects, users and the catalog.

use clap::{Args, Subcommand};

use docflow_core::error::AppError;
use docflow_core::types::UserId;
use docflow_entity::catalog::{CatalogKind, SystemCatalog};
use docflow_entity::project::CreateProject;
use docflow_entity::user::{CreateUser, RoleSet, UserRole};
use docflow_service::ActorContext;

use super::workspace::Workspace;
use crate::output::{self, OutputFormat, ProjectRow, UserRow};

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List projects
    Projects,
    /// Create a project
    ProjectCreate {
        /// Project name
        #[arg(long)]
        name: String,
        /// Unique project code
        #[arg(long)]
        code: String,
        /// Work-breakdown structure code
        #[arg(long)]
        wbs: String,
        /// Site identifier
        #[arg(long)]
        site: String,
        /// Contracting client
        #[arg(long)]
        direct_client: String,
        /// End client
        #[arg(long)]
        final_client: String,
        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List users
    Users,
    /// Create a user
    UserCreate {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Comma-separated roles; the first is the primary role
        #[arg(long, value_delimiter = ',', required = true)]
        roles: Vec<UserRole>,
        /// Project code or id; omitted for global users
        #[arg(short, long)]
        project: Option<String>,
    },
    /// Grant a role, or revoke it if the user already holds it
    ToggleRole {
        /// User email or id
        user: String,
        /// Role to toggle
        role: UserRole,
    },
    /// Show the catalog
    Catalog,
    /// Add a catalog value
    CatalogAdd {
        /// List to change (discipline, nature, issuer)
        kind: CatalogKind,
        /// Value to add
        value: String,
    },
    /// Remove a catalog value
    CatalogRemove {
        /// List to change (discipline, nature, issuer)
        kind: CatalogKind,
        /// Value to remove
        value: String,
    },
}

/// Execute admin commands
pub async fn execute(
    ws: &Workspace,
    actor: &ActorContext,
    args: &AdminArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        AdminCommand::Projects => {
            let projects = ws.admin.list_projects(actor).await?;
            output::print_list(&projects, format, ProjectRow::from_project);
        }
        AdminCommand::ProjectCreate {
            name,
            code,
            wbs,
            site,
            direct_client,
            final_client,
            description,
        } => {
            let payload = CreateProject {
                name: name.clone(),
                code: code.clone(),
                description: description.clone(),
                wbs: wbs.clone(),
                substation: site.clone(),
                direct_client: direct_client.clone(),
                final_client: final_client.clone(),
            };
            let project = ws.admin.create_project(actor, payload).await?;
            ws.persist().await?;
            match format {
                OutputFormat::Json => output::print_json(&project),
                OutputFormat::Table => output::print_success(&format!(
                    "Project {} created ({})",
                    project.code, project.id
                )),
            }
        }
        AdminCommand::Users => {
            let users = ws.admin.list_users(actor).await?;
            output::print_list(&users, format, UserRow::from_user);
        }
        AdminCommand::UserCreate {
            name,
            email,
            roles,
            project,
        } => {
            let project_id = match project {
                Some(reference) => Some(ws.resolve_project(actor, reference).await?),
                None => None,
            };
            let payload = CreateUser {
                name: name.clone(),
                email: email.clone(),
                roles: RoleSet::new(roles.iter().copied())?,
                project_id,
            };
            let user = ws.admin.create_user(actor, payload).await?;
            ws.persist().await?;
            match format {
                OutputFormat::Json => output::print_json(&user),
                OutputFormat::Table => output::print_success(&format!(
                    "User {} created with roles {}",
                    user.email, user.roles
                )),
            }
        }
        AdminCommand::ToggleRole { user, role } => {
            let user_id = match user.parse::<UserId>() {
                Ok(id) => id,
                Err(_) => ws.admin.find_user_by_email(user).await?.id,
            };
            let updated = ws.admin.toggle_role(actor, user_id, *role).await?;
            ws.persist().await?;
            match format {
                OutputFormat::Json => output::print_json(&updated),
                OutputFormat::Table => output::print_success(&format!(
                    "{} now holds {}",
                    updated.email, updated.roles
                )),
            }
        }
        AdminCommand::Catalog => print_catalog(&ws.catalog.get().await, format),
        AdminCommand::CatalogAdd { kind, value } => {
            let catalog = ws.catalog.add(actor, *kind, value).await?;
            ws.persist().await?;
            output::print_success(&format!("Added '{}' to {kind}", value.trim()));
            print_catalog(&catalog, format);
        }
        AdminCommand::CatalogRemove { kind, value } => {
            let catalog = ws.catalog.remove(actor, *kind, value).await?;
            ws.persist().await?;
            output::print_success(&format!("Removed '{value}' from {kind}"));
            print_catalog(&catalog, format);
        }
    }
    Ok(())
}

fn print_catalog(catalog: &SystemCatalog, format: OutputFormat) {
    if format == OutputFormat::Json {
        output::print_json(catalog);
        return;
    }
    for kind in [
        CatalogKind::Discipline,
        CatalogKind::Nature,
        CatalogKind::Issuer,
    ] {
        println!("{kind}");
        for value in catalog.values(kind) {
            println!("  - {value}");
        }
    }
}
