//! Document version history entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserRole;

use super::label::VersionLabel;
use super::qualification::Qualification;
use super::status::WorkflowStatus;

/// What produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionEntryKind {
    /// The document was registered.
    Created,
    /// A workflow action changed status and qualification.
    Transition,
    /// Metadata fields were edited; status is unchanged.
    MetadataUpdate,
    /// A new revision label was issued.
    Reissue,
    /// Seed entry of an automatically generated transmittal.
    Generated,
}

/// One immutable entry of a document's audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentVersion {
    /// Revision label at the time of the entry.
    pub version: VersionLabel,
    /// Status recorded by the entry.
    pub status: WorkflowStatus,
    /// Qualification recorded by the entry.
    pub qualification: Qualification,
    /// When the entry was appended.
    pub updated_at: DateTime<Utc>,
    /// Display name of the actor.
    pub updated_by: String,
    /// The actor's primary role.
    pub updated_by_role: Option<UserRole>,
    /// Comment, including attachment markers.
    pub comments: String,
    /// Name of the attached or forwarded file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_name: Option<String>,
    /// Link to the stored file, when the storage layer provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    /// What produced the entry.
    pub kind: VersionEntryKind,
}
