//! Workflow commands: transition, batch, metadata and reissue.

use clap::Args;

use docflow_core::error::AppError;
use docflow_entity::document::{
    Attachment, Document, FieldUpdate, Qualification, VersionLabel, WorkflowStatus,
};
use docflow_service::ActorContext;
use docflow_service::workflow::{
    BatchItem, BatchRequest, MetadataOutcome, ReissueRequest, TransitionRequest,
};

use super::workspace::Workspace;
use crate::output::{self, DocumentRow, OutputFormat};

/// Attachment flags shared by the mutating commands
#[derive(Debug, Args)]
pub struct AttachmentArgs {
    /// Name of a newly uploaded file
    #[arg(long, conflicts_with = "forward")]
    pub attach: Option<String>,
    /// Forward the attachment of the latest history entry
    #[arg(long)]
    pub forward: bool,
}

impl AttachmentArgs {
    fn resolve(&self, doc: &Document) -> Result<Option<Attachment>, AppError> {
        if let Some(name) = &self.attach {
            return Ok(Some(Attachment::Upload(name.clone())));
        }
        if self.forward {
            let name = doc.last_attachment().ok_or_else(|| {
                AppError::validation(format!("'{}' has no attachment to forward", doc.code))
            })?;
            return Ok(Some(Attachment::Forwarded(name.to_string())));
        }
        Ok(None)
    }
}

/// Arguments for `transition`
#[derive(Debug, Args)]
pub struct TransitionArgs {
    /// Document code or id
    pub document: String,
    /// Target status
    #[arg(short, long)]
    pub status: WorkflowStatus,
    /// Target qualification
    #[arg(short = 'Q', long, default_value = "none")]
    pub qualification: Qualification,
    /// Comment (mandatory)
    #[arg(short = 'm', long, default_value = "")]
    pub comment: String,
    /// Attachment
    #[command(flatten)]
    pub attachment: AttachmentArgs,
}

/// Arguments for `batch`
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Document codes or ids
    #[arg(required = true)]
    pub documents: Vec<String>,
    /// Target status
    #[arg(short, long)]
    pub status: WorkflowStatus,
    /// Target qualification
    #[arg(short = 'Q', long, default_value = "none")]
    pub qualification: Qualification,
    /// Comment recorded on every document; the configured default when absent
    #[arg(short = 'm', long)]
    pub comment: Option<String>,
}

/// Arguments for `metadata`
#[derive(Debug, Args)]
pub struct MetadataArgs {
    /// Document code or id
    pub document: String,
    /// Field assignments, e.g. `title="New title"` or `forecast_date=2024-05-01`
    #[arg(required = true)]
    pub assignments: Vec<String>,
}

/// Arguments for `reissue`
#[derive(Debug, Args)]
pub struct ReissueArgs {
    /// Document code or id
    pub document: String,
    /// Explicit new revision label; the next one in sequence when absent
    #[arg(short, long)]
    pub label: Option<VersionLabel>,
    /// Comment (mandatory)
    #[arg(short = 'm', long, default_value = "")]
    pub comment: String,
    /// Attachment
    #[command(flatten)]
    pub attachment: AttachmentArgs,
}

/// Execute `transition`
pub async fn transition(
    ws: &Workspace,
    actor: &ActorContext,
    args: &TransitionArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let id = ws.resolve_document(actor, &args.document).await?;
    let current = ws.documents.get(actor, id).await?;
    let request = TransitionRequest {
        status: args.status,
        qualification: args.qualification,
        comment: args.comment.clone(),
        attachment: args.attachment.resolve(&current)?,
    };

    let result = ws.documents.transition(actor, id, &request).await?;
    ws.persist().await?;

    if format == OutputFormat::Json {
        output::print_json(&serde_json::json!({
            "document": result.document,
            "transmittal": result.transmittal,
        }));
        return Ok(());
    }
    output::print_success(&format!(
        "{} moved to {} / {}",
        result.document.code, result.document.current_status, result.document.current_qualification
    ));
    if let Some(grd) = &result.transmittal {
        output::print_success(&format!("Transmittal {} generated: {}", grd.code, grd.title));
    }
    Ok(())
}

/// Execute `batch`
pub async fn batch(
    ws: &Workspace,
    actor: &ActorContext,
    args: &BatchArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut items = Vec::with_capacity(args.documents.len());
    for reference in &args.documents {
        let document_id = ws.resolve_document(actor, reference).await?;
        items.push(BatchItem {
            document_id,
            comment: args.comment.clone(),
            attachment: None,
        });
    }
    let request = BatchRequest {
        status: args.status,
        qualification: args.qualification,
        items,
    };

    let outcome = ws.documents.batch(actor, &request).await?;
    ws.persist().await?;

    if format == OutputFormat::Json {
        output::print_json(&serde_json::json!({
            "documents": outcome.documents,
            "transmittal": outcome.transmittal,
        }));
        return Ok(());
    }
    output::print_list(&outcome.documents, format, DocumentRow::from_document);
    if let Some(grd) = &outcome.transmittal {
        output::print_success(&format!("Transmittal {} generated: {}", grd.code, grd.title));
    }
    Ok(())
}

/// Execute `metadata`
pub async fn metadata(
    ws: &Workspace,
    actor: &ActorContext,
    args: &MetadataArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let updates = args
        .assignments
        .iter()
        .map(|a| FieldUpdate::parse_assignment(a))
        .collect::<Result<Vec<_>, _>>()?;
    let id = ws.resolve_document(actor, &args.document).await?;

    match ws.documents.update_metadata(actor, id, &updates).await? {
        MetadataOutcome::Unchanged => {
            output::print_warning("No field changed; nothing recorded");
        }
        MetadataOutcome::Updated {
            document,
            record,
            changes,
        } => {
            ws.persist().await?;
            match format {
                OutputFormat::Json => output::print_json(&serde_json::json!({
                    "document": document,
                    "changes": changes,
                })),
                OutputFormat::Table => {
                    output::print_success(&format!(
                        "{} updated ({} field(s))",
                        document.code,
                        changes.len()
                    ));
                    output::print_kv("Logged", &record.comments);
                }
            }
        }
    }
    Ok(())
}

/// Execute `reissue`
pub async fn reissue(
    ws: &Workspace,
    actor: &ActorContext,
    args: &ReissueArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let id = ws.resolve_document(actor, &args.document).await?;
    let current = ws.documents.get(actor, id).await?;
    let request = ReissueRequest {
        label: args.label.clone(),
        comment: args.comment.clone(),
        attachment: args.attachment.resolve(&current)?,
    };

    let doc = ws.documents.reissue(actor, id, &request).await?;
    ws.persist().await?;

    match format {
        OutputFormat::Json => output::print_json(&doc),
        OutputFormat::Table => output::print_success(&format!(
            "{} is now at revision {}",
            doc.code, doc.current_version
        )),
    }
    Ok(())
}
