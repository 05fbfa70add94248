//! Workflow engine configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings for transitions, batches, metadata audit and the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Comment recorded for batch items submitted without one.
    #[validate(length(min = 1))]
    pub batch_default_comment: String,
    /// Marker appended to a comment when a new file is attached.
    pub new_attachment_marker: String,
    /// Marker appended to a comment when a prior attachment is forwarded.
    /// The forwarded name is inserted after it.
    pub forwarded_attachment_marker: String,
    /// Placeholder rendered for unset values in metadata changelogs.
    pub empty_value_placeholder: String,
    /// Comment recorded on the first version of a new document.
    pub creation_comment: String,
    /// Reject discipline/nature/issuer values missing from the catalog.
    pub enforce_catalog: bool,
    /// Days ahead considered "upcoming" on the dashboard.
    #[validate(range(min = 1, max = 365))]
    pub upcoming_window_days: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            batch_default_comment: "Batch update".to_string(),
            new_attachment_marker: "[New attachment]".to_string(),
            forwarded_attachment_marker: "Forwarded attachment:".to_string(),
            empty_value_placeholder: "(empty)".to_string(),
            creation_comment: "Document created.".to_string(),
            enforce_catalog: false,
            upcoming_window_days: 7,
        }
    }
}
