//! Opaque attachment reference supplied with a workflow action.

use serde::{Deserialize, Serialize};

/// A file that accompanies a transition.
///
/// The workflow never inspects file bytes: an upload is known by its name,
/// a forwarded attachment by the name of a previously stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Attachment {
    /// A freshly uploaded file.
    Upload(String),
    /// A reference to an attachment already stored on an earlier version.
    Forwarded(String),
}

impl Attachment {
    /// The file name recorded on the version entry.
    pub fn name(&self) -> &str {
        match self {
            Self::Upload(name) | Self::Forwarded(name) => name,
        }
    }

    /// Whether this is a new upload.
    pub fn is_upload(&self) -> bool {
        matches!(self, Self::Upload(_))
    }
}
