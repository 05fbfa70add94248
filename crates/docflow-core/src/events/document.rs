//! Document-related domain events.
//!
//! Statuses and qualifications are carried as their wire names so this
//! crate stays independent of the entity crate.

use serde::{Deserialize, Serialize};

use crate::types::{DocumentId, ProjectId};

/// Events related to document lifecycle operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DocumentEvent {
    /// A document was registered.
    Created {
        /// The new document.
        document_id: DocumentId,
        /// Owning project.
        project_id: ProjectId,
        /// Human-readable code.
        code: String,
    },
    /// A workflow transition was applied.
    StatusChanged {
        /// The document.
        document_id: DocumentId,
        /// Status before the transition.
        from_status: String,
        /// Status after the transition.
        to_status: String,
        /// Qualification after the transition.
        qualification: String,
    },
    /// Metadata fields were edited.
    MetadataUpdated {
        /// The document.
        document_id: DocumentId,
        /// Names of the fields that changed.
        changed_fields: Vec<String>,
    },
    /// A new version label was issued.
    VersionReissued {
        /// The document.
        document_id: DocumentId,
        /// Label before re-issue.
        from_version: String,
        /// Label after re-issue.
        to_version: String,
    },
    /// A transmittal was generated for documents sent to the client.
    TransmittalGenerated {
        /// The transmittal document.
        transmittal_id: DocumentId,
        /// Its generated code.
        code: String,
        /// Documents covered by the transmittal.
        related: Vec<DocumentId>,
    },
}

impl DocumentEvent {
    /// Snake-case event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::StatusChanged { .. } => "status_changed",
            Self::MetadataUpdated { .. } => "metadata_updated",
            Self::VersionReissued { .. } => "version_reissued",
            Self::TransmittalGenerated { .. } => "transmittal_generated",
        }
    }
}
