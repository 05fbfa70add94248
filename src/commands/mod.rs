//! CLI command definitions and dispatch.

pub mod admin;
pub mod document;
pub mod init;
pub mod stats;
pub mod workflow;
pub mod workspace;

use clap::{Parser, Subcommand};

use docflow_core::config::AppConfig;
use docflow_core::error::AppError;

use crate::output::OutputFormat;

/// DocFlow: engineering document workflow
#[derive(Debug, Parser)]
#[command(name = "docflow", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Path to the JSON snapshot holding the data (overrides store.snapshot_path)
    #[arg(short, long, global = true)]
    pub snapshot: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Email of the user to act as
    #[arg(long = "as", value_name = "EMAIL", global = true)]
    pub as_email: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a snapshot seeded with demo data
    Init(init::InitArgs),
    /// List documents
    List(document::ListArgs),
    /// Show a document and its history
    Show(document::ShowArgs),
    /// Show the workflow actions available on one or more documents
    Actions(document::ActionsArgs),
    /// Apply a workflow action to a document
    Transition(workflow::TransitionArgs),
    /// Apply one workflow action to several documents
    Batch(workflow::BatchArgs),
    /// Edit document metadata
    Metadata(workflow::MetadataArgs),
    /// Issue a new revision of a document
    Reissue(workflow::ReissueArgs),
    /// Register a new document
    Create(document::CreateArgs),
    /// Dashboard summary
    Stats(stats::StatsArgs),
    /// Projects, users and catalog
    Admin(admin::AdminArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        if let Commands::Init(args) = &self.command {
            return init::execute(args, &config, self.snapshot.as_deref()).await;
        }

        let ws = workspace::Workspace::open(&config, self.snapshot.as_deref()).await?;
        let email = self.as_email.as_deref().ok_or_else(|| {
            AppError::validation("Pass --as EMAIL to choose the acting user")
        })?;
        let actor = ws.actor(email).await?;
        let format = self.format;

        match &self.command {
            Commands::Init(_) => Ok(()),
            Commands::List(args) => document::list(&ws, &actor, args, format).await,
            Commands::Show(args) => document::show(&ws, &actor, args, format).await,
            Commands::Actions(args) => document::actions(&ws, &actor, args, format).await,
            Commands::Create(args) => document::create(&ws, &actor, args, format).await,
            Commands::Transition(args) => workflow::transition(&ws, &actor, args, format).await,
            Commands::Batch(args) => workflow::batch(&ws, &actor, args, format).await,
            Commands::Metadata(args) => workflow::metadata(&ws, &actor, args, format).await,
            Commands::Reissue(args) => workflow::reissue(&ws, &actor, args, format).await,
            Commands::Stats(args) => stats::execute(&ws, &actor, args, format).await,
            Commands::Admin(args) => admin::execute(&ws, &actor, args, format).await,
        }
    }
}
