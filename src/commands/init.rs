//! `docflow init`: write a demo snapshot.

use chrono::Utc;
use clap::Args;

use docflow_core::config::AppConfig;
use docflow_core::error::AppError;
use docflow_entity::catalog::SystemCatalog;
use docflow_store::Snapshot;
use docflow_store::seed::demo_snapshot;

use crate::output;

/// Arguments for `init`
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Replace an existing snapshot
    #[arg(long)]
    pub force: bool,

    /// Start with no projects, users or documents; only an administrator
    #[arg(long)]
    pub empty: bool,
}

/// Execute `init`
pub async fn execute(
    args: &InitArgs,
    config: &AppConfig,
    snapshot: Option<&str>,
) -> Result<(), AppError> {
    let path = super::workspace::snapshot_path(config, snapshot);
    if !args.force && Snapshot::load(&path).await?.is_some() {
        return Err(AppError::conflict(format!(
            "A snapshot already exists at {}; pass --force to replace it",
            path.display()
        )));
    }

    let catalog = SystemCatalog::from(config.catalog.clone());
    let mut seeded = demo_snapshot(catalog, Utc::now())?;
    if args.empty {
        seeded.projects.clear();
        seeded.documents.clear();
        seeded.users.retain(|u| u.is_global());
    }
    seeded.save(&path, config.store.pretty).await?;

    output::print_success(&format!("Snapshot written to {}", path.display()));
    output::print_kv("Projects", &seeded.projects.len().to_string());
    output::print_kv("Users", &seeded.users.len().to_string());
    output::print_kv("Documents", &seeded.documents.len().to_string());
    for user in &seeded.users {
        output::print_kv(&user.email, &user.roles.to_string());
    }
    Ok(())
}
