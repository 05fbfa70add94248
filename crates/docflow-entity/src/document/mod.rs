//! Document domain entities.

pub mod attachment;
pub mod filter;
pub mod kind;
pub mod label;
pub mod metadata;
pub mod model;
pub mod qualification;
pub mod status;
pub mod version;

pub use attachment::Attachment;
pub use filter::DocumentFilter;
pub use kind::DocumentType;
pub use label::VersionLabel;
pub use metadata::{FieldUpdate, FieldValue, MetadataField};
pub use model::{Document, NewDocument};
pub use qualification::Qualification;
pub use status::WorkflowStatus;
pub use version::{DocumentVersion, VersionEntryKind};
