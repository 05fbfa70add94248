//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use docflow_auth::WorkflowAction;
use docflow_entity::document::{Document, DocumentVersion};
use docflow_entity::project::Project;
use docflow_entity::user::User;
use docflow_service::report::{DeadlineItem, StatusCount};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print rows as a table, or the raw items as JSON.
pub fn print_list<T, R>(items: &[T], format: OutputFormat, to_row: impl Fn(&T) -> R)
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                let rows: Vec<R> = items.iter().map(to_row).collect();
                println!("{}", Table::new(rows));
            }
        }
        OutputFormat::Json => print_json(&items),
    }
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    println!("{json}");
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<20} {}", format!("{key}:"), value);
}

/// Document row for list output
#[derive(Debug, Tabled)]
pub struct DocumentRow {
    /// Code
    code: String,
    /// Title
    title: String,
    /// Type
    #[tabled(rename = "type")]
    doc_type: String,
    /// Revision
    rev: String,
    /// Status
    status: String,
    /// Qualification
    qual: String,
    /// Lock marker
    locked: String,
    /// Last modification
    modified: String,
}

impl DocumentRow {
    /// Build the row for a document.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            code: doc.code.clone(),
            title: truncate(&doc.title, 40),
            doc_type: doc.doc_type.to_string(),
            rev: doc.current_version.to_string(),
            status: doc.current_status.to_string(),
            qual: doc.current_qualification.code().to_string(),
            locked: if doc.is_locked { "yes" } else { "" }.to_string(),
            modified: doc.last_modified.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// History row for `show`
#[derive(Debug, Tabled)]
pub struct HistoryRow {
    /// When
    at: String,
    /// Revision
    rev: String,
    /// Status
    status: String,
    /// Qualification
    qual: String,
    /// Actor
    by: String,
    /// Comment
    comment: String,
}

impl HistoryRow {
    /// Build the row for a history entry.
    pub fn from_version(entry: &DocumentVersion) -> Self {
        let by = match entry.updated_by_role {
            Some(role) => format!("{} ({})", entry.updated_by, role.label()),
            None => entry.updated_by.clone(),
        };
        Self {
            at: entry.updated_at.format("%Y-%m-%d %H:%M").to_string(),
            rev: entry.version.to_string(),
            status: entry.status.to_string(),
            qual: entry.qualification.code().to_string(),
            by,
            comment: truncate(&entry.comments, 60),
        }
    }
}

/// Action row for `actions`
#[derive(Debug, Tabled)]
pub struct ActionRow {
    /// Label
    action: String,
    /// Target status
    status: String,
    /// Target qualification
    qualification: String,
}

impl ActionRow {
    /// Build the row for an action.
    pub fn from_action(action: &WorkflowAction) -> Self {
        Self {
            action: action.label.to_string(),
            status: action.target_status.to_string(),
            qualification: action.target_qualification.to_string(),
        }
    }
}

/// Project row
#[derive(Debug, Tabled)]
pub struct ProjectRow {
    /// Code
    code: String,
    /// Name
    name: String,
    /// Site
    site: String,
    /// Final client
    client: String,
}

impl ProjectRow {
    /// Build the row for a project.
    pub fn from_project(project: &Project) -> Self {
        Self {
            code: project.code.clone(),
            name: project.name.clone(),
            site: project.substation.clone(),
            client: project.final_client.clone(),
        }
    }
}

/// User row
#[derive(Debug, Tabled)]
pub struct UserRow {
    /// ID
    id: String,
    /// Email
    email: String,
    /// Name
    name: String,
    /// Roles
    roles: String,
    /// Scope
    project: String,
}

impl UserRow {
    /// Build the row for a user.
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            roles: user.roles.to_string(),
            project: user
                .project_id
                .map(|p| p.to_string())
                .unwrap_or_else(|| "(global)".to_string()),
        }
    }
}

/// Status count row for `stats`
#[derive(Debug, Tabled)]
pub struct StatusRow {
    /// Status
    status: String,
    /// Documents
    count: usize,
}

impl StatusRow {
    /// Build the row for a status count.
    pub fn from_count(entry: &StatusCount) -> Self {
        Self {
            status: entry.status.label().to_string(),
            count: entry.count,
        }
    }
}

/// Deadline row for `stats`
#[derive(Debug, Tabled)]
pub struct DeadlineRow {
    /// Code
    code: String,
    /// Title
    title: String,
    /// Status
    status: String,
    /// Forecast date
    forecast: String,
    /// Days left
    days: i64,
}

impl DeadlineRow {
    /// Build the row for a deadline entry.
    pub fn from_item(item: &DeadlineItem) -> Self {
        Self {
            code: item.code.clone(),
            title: truncate(&item.title, 40),
            status: item.status.to_string(),
            forecast: item.forecast_date.to_string(),
            days: item.days_left,
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
