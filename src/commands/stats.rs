//! `docflow stats`: dashboard summary.

use chrono::{Local, NaiveDate};
use clap::Args;

use docflow_core::error::AppError;
use docflow_service::ActorContext;

use super::workspace::Workspace;
use crate::output::{self, DeadlineRow, OutputFormat, StatusRow};

/// Arguments for `stats`
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Restrict to one project (code or id)
    #[arg(short, long)]
    pub project: Option<String>,

    /// Reference date for deadlines (YYYY-MM-DD); today when absent
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

/// Execute `stats`
pub async fn execute(
    ws: &Workspace,
    actor: &ActorContext,
    args: &StatsArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let project_id = match &args.project {
        Some(reference) => Some(ws.resolve_project(actor, reference).await?),
        None => None,
    };
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let report = ws.dashboard.build(actor, project_id, today).await?;

    if format == OutputFormat::Json {
        output::print_json(&report);
        return Ok(());
    }

    println!("Dashboard for {} ({})", actor.name, report.today);
    output::print_kv("Total", &report.total.to_string());
    output::print_kv("In progress", &report.in_progress.to_string());
    output::print_kv("Pending client", &report.pending_client.to_string());
    output::print_kv("Approved for exec.", &report.execution.to_string());
    output::print_kv("Cancelled", &report.cancelled.to_string());
    output::print_kv("My tasks", &report.my_tasks.to_string());

    println!();
    output::print_list(&report.by_status, format, StatusRow::from_count);

    if !report.overdue.is_empty() {
        println!("\nOverdue");
        output::print_list(&report.overdue, format, DeadlineRow::from_item);
    }
    if !report.upcoming.is_empty() {
        println!("\nUpcoming");
        output::print_list(&report.upcoming, format, DeadlineRow::from_item);
    }
    Ok(())
}
