//! Document read commands and registration.

use chrono::NaiveDate;
use clap::Args;

use docflow_core::error::AppError;
use docflow_entity::document::{DocumentFilter, DocumentType, NewDocument, WorkflowStatus};
use docflow_service::ActorContext;

use super::workspace::Workspace;
use crate::output::{self, ActionRow, DocumentRow, HistoryRow, OutputFormat};

/// Arguments for `list`
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Project code or id
    #[arg(short, long)]
    pub project: Option<String>,
    /// Document type
    #[arg(short = 't', long = "type")]
    pub doc_type: Option<DocumentType>,
    /// Current status
    #[arg(long)]
    pub status: Option<WorkflowStatus>,
    /// Exact discipline
    #[arg(long)]
    pub discipline: Option<String>,
    /// Substring of the revision label
    #[arg(long)]
    pub version: Option<String>,
    /// Substring of the code or title
    #[arg(short = 'q', long)]
    pub text: Option<String>,
    /// Only transmittals and documents awaiting the client
    #[arg(long)]
    pub transmittals: bool,
}

/// Arguments for `show`
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Document code or id
    pub document: String,
}

/// Arguments for `actions`
#[derive(Debug, Args)]
pub struct ActionsArgs {
    /// Document codes or ids; several show the actions common to all
    #[arg(required = true)]
    pub documents: Vec<String>,
}

/// Arguments for `create`
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Project code or id
    #[arg(short, long)]
    pub project: String,
    /// Document code
    #[arg(long)]
    pub code: String,
    /// Title
    #[arg(long)]
    pub title: String,
    /// Document type
    #[arg(short = 't', long = "type", default_value = "technical")]
    pub doc_type: DocumentType,
    /// Discipline
    #[arg(long)]
    pub discipline: String,
    /// Nature
    #[arg(long)]
    pub nature: String,
    /// Issuer
    #[arg(long)]
    pub issuer: String,
    /// Name of the uploaded file
    #[arg(long)]
    pub file: Option<String>,
    /// Client-side document code
    #[arg(long)]
    pub ge_code: Option<String>,
    /// Code in the accessed party's system
    #[arg(long)]
    pub access_code: Option<String>,
    /// TAF/TAC reference
    #[arg(long)]
    pub taf_tac: Option<String>,
    /// Deadline (YYYY-MM-DD)
    #[arg(long)]
    pub forecast: Option<NaiveDate>,
    /// Issued for information only
    #[arg(long)]
    pub informative: bool,
    /// As-built deliverable
    #[arg(long)]
    pub as_built: bool,
}

/// Execute `list`
pub async fn list(
    ws: &Workspace,
    actor: &ActorContext,
    args: &ListArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let project_id = match &args.project {
        Some(reference) => Some(ws.resolve_project(actor, reference).await?),
        None => None,
    };
    let filter = DocumentFilter {
        project_id,
        doc_type: args.doc_type,
        status: args.status,
        discipline: args.discipline.clone(),
        version_contains: args.version.clone(),
        text: args.text.clone(),
        transmittal_view: args.transmittals,
    };
    let docs = ws.documents.list(actor, &filter).await?;
    output::print_list(&docs, format, DocumentRow::from_document);
    Ok(())
}

/// Execute `show`
pub async fn show(
    ws: &Workspace,
    actor: &ActorContext,
    args: &ShowArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let id = ws.resolve_document(actor, &args.document).await?;
    let doc = ws.documents.get(actor, id).await?;

    if format == OutputFormat::Json {
        output::print_json(&doc);
        return Ok(());
    }

    println!("{} ({})", doc.code, doc.id);
    output::print_kv("Title", &doc.title);
    output::print_kv("Type", doc.doc_type.as_str());
    output::print_kv("Discipline", &doc.discipline);
    output::print_kv("Nature", &doc.nature);
    output::print_kv("Issuer", &doc.issuer);
    output::print_kv("Revision", doc.current_version.as_str());
    output::print_kv("Status", doc.current_status.label());
    output::print_kv("Qualification", doc.current_qualification.as_str());
    output::print_kv("Locked", if doc.is_locked { "yes" } else { "no" });
    if let Some(date) = doc.forecast_date {
        output::print_kv("Forecast", &date.to_string());
    }
    for (label, value) in [
        ("GE code", &doc.ge_code),
        ("Access code", &doc.access_code),
        ("TAF/TAC", &doc.taf_tac),
    ] {
        if let Some(value) = value {
            output::print_kv(label, value);
        }
    }
    println!();
    output::print_list(&doc.versions, format, HistoryRow::from_version);
    Ok(())
}

/// Execute `actions`
pub async fn actions(
    ws: &Workspace,
    actor: &ActorContext,
    args: &ActionsArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut ids = Vec::with_capacity(args.documents.len());
    for reference in &args.documents {
        ids.push(ws.resolve_document(actor, reference).await?);
    }

    let actions = match ids.as_slice() {
        [single] => ws.documents.legal_actions(actor, *single).await?,
        many => ws.documents.batch_actions(actor, many).await?,
    };
    if actions.is_empty() && format == OutputFormat::Table {
        output::print_warning("No workflow action is available");
        return Ok(());
    }
    output::print_list(&actions, format, ActionRow::from_action);
    Ok(())
}

/// Execute `create`
pub async fn create(
    ws: &Workspace,
    actor: &ActorContext,
    args: &CreateArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let project_id = ws.resolve_project(actor, &args.project).await?;
    let payload = NewDocument {
        code: args.code.clone(),
        title: args.title.clone(),
        doc_type: args.doc_type,
        discipline: args.discipline.clone(),
        nature: args.nature.clone(),
        issuer: args.issuer.clone(),
        file_name: args.file.clone(),
        ge_code: args.ge_code.clone(),
        access_code: args.access_code.clone(),
        taf_tac: args.taf_tac.clone(),
        forecast_date: args.forecast,
        informative: args.informative,
        as_built: args.as_built,
    };
    let doc = ws.documents.create(actor, project_id, payload).await?;
    ws.persist().await?;

    match format {
        OutputFormat::Json => output::print_json(&doc),
        OutputFormat::Table => output::print_success(&format!(
            "Created {} at revision {} ({})",
            doc.code, doc.current_version, doc.id
        )),
    }
    Ok(())
}
