//! Document type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::label::VersionLabel;

/// Classification of a document; decides its version label scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    /// Engineering deliverable; alphanumeric revisions ("0A", "0B", ...).
    Technical,
    /// Management document; numeric revisions ("01", "02", ...).
    Managerial,
    /// Generated transmittal record (GRD).
    Transmittal,
}

impl DocumentType {
    /// Return the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "TECHNICAL",
            Self::Managerial => "MANAGERIAL",
            Self::Transmittal => "TRANSMITTAL",
        }
    }

    /// The label a freshly created document of this type starts at.
    pub fn initial_version(&self) -> VersionLabel {
        match self {
            Self::Technical => VersionLabel::new_unchecked("0A"),
            Self::Managerial => VersionLabel::new_unchecked("01"),
            Self::Transmittal => VersionLabel::new_unchecked("00"),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = docflow_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TECHNICAL" => Ok(Self::Technical),
            "MANAGERIAL" => Ok(Self::Managerial),
            "TRANSMITTAL" | "GRD" => Ok(Self::Transmittal),
            _ => Err(docflow_core::AppError::validation(format!(
                "Invalid document type: '{s}'. Expected one of: technical, managerial, transmittal"
            ))),
        }
    }
}
