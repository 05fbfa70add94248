//! Document entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use docflow_core::traits::Identifiable;
use docflow_core::types::{DocumentId, ProjectId};

use super::kind::DocumentType;
use super::label::VersionLabel;
use super::qualification::Qualification;
use super::status::WorkflowStatus;
use super::version::DocumentVersion;

/// A controlled document and its embedded version history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique document identifier.
    pub id: DocumentId,
    /// Owning project; never changes after creation.
    pub project_id: ProjectId,
    /// Human-readable code (not necessarily unique).
    pub code: String,
    /// Title.
    pub title: String,
    /// Document type.
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// Discipline (catalog value).
    pub discipline: String,
    /// Nature (catalog value).
    pub nature: String,
    /// Issuer (catalog value).
    pub issuer: String,
    /// Current revision label.
    pub current_version: VersionLabel,
    /// Current lifecycle status.
    pub current_status: WorkflowStatus,
    /// Current qualification.
    pub current_qualification: Qualification,
    /// Advisory lock, set while the document sits with the client.
    pub is_locked: bool,
    /// History, newest first. Append-only: entries are never edited,
    /// reordered or removed.
    pub versions: Vec<DocumentVersion>,
    /// Time of the most recent mutation.
    pub last_modified: DateTime<Utc>,
    /// Deadline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_date: Option<NaiveDate>,
    /// Issued for information only.
    #[serde(default)]
    pub informative: bool,
    /// Flagged as an as-built deliverable.
    #[serde(default)]
    pub as_built: bool,
    /// Factory/commissioning acceptance test reference (TAF/TAC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taf_tac: Option<String>,
    /// Client-side (GE) document code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ge_code: Option<String>,
    /// Code in the accessed party's system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_code: Option<String>,
}

impl Document {
    /// The newest history entry.
    pub fn latest(&self) -> Option<&DocumentVersion> {
        self.versions.first()
    }

    /// Prepend a history entry.
    pub fn push_version(&mut self, entry: DocumentVersion) {
        self.versions.insert(0, entry);
    }

    /// Whether this is a generated transmittal.
    pub fn is_transmittal(&self) -> bool {
        self.doc_type == DocumentType::Transmittal
    }

    /// Whole days from `today` to the deadline (negative when overdue).
    pub fn days_until_deadline(&self, today: NaiveDate) -> Option<i64> {
        self.forecast_date
            .map(|deadline| (deadline - today).num_days())
    }

    /// Attachment name on the newest entry, offered for forwarding.
    pub fn last_attachment(&self) -> Option<&str> {
        self.latest().and_then(|v| v.attachment_name.as_deref())
    }
}

impl Identifiable for Document {
    type Id = DocumentId;

    fn id(&self) -> DocumentId {
        self.id
    }
}

/// Data required to register a new document.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewDocument {
    /// Human-readable code.
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub code: String,
    /// Title.
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub title: String,
    /// Document type. Transmittals cannot be created by hand.
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// Discipline.
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub discipline: String,
    /// Nature.
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub nature: String,
    /// Issuer.
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub issuer: String,
    /// Name of the uploaded file, if one accompanies the registration.
    #[serde(default)]
    pub file_name: Option<String>,
    /// Client-side document code.
    #[serde(default)]
    pub ge_code: Option<String>,
    /// Code in the accessed party's system.
    #[serde(default)]
    pub access_code: Option<String>,
    /// TAF/TAC reference.
    #[serde(default)]
    pub taf_tac: Option<String>,
    /// Deadline.
    #[serde(default)]
    pub forecast_date: Option<NaiveDate>,
    /// Informative flag.
    #[serde(default)]
    pub informative: bool,
    /// As-built flag.
    #[serde(default)]
    pub as_built: bool,
}
