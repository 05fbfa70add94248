//! Qualification enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The verdict attached to a status change, orthogonal to the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Qualification {
    /// No verdict.
    None,
    /// AP.
    Approved,
    /// AC.
    ApprovedWithComments,
    /// RE.
    Rejected,
    /// CA.
    Cancelled,
    /// IF.
    Informative,
    /// AS.
    AsBuilt,
}

impl Qualification {
    /// Every qualification.
    pub const ALL: [Qualification; 7] = [
        Self::None,
        Self::Approved,
        Self::ApprovedWithComments,
        Self::Rejected,
        Self::Cancelled,
        Self::Informative,
        Self::AsBuilt,
    ];

    /// Return the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Approved => "APPROVED",
            Self::ApprovedWithComments => "APPROVED_WITH_COMMENTS",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
            Self::Informative => "INFORMATIVE",
            Self::AsBuilt => "AS_BUILT",
        }
    }

    /// Two-letter code used on drawings and transmittals.
    pub fn code(&self) -> &'static str {
        match self {
            Self::None => "-",
            Self::Approved => "AP",
            Self::ApprovedWithComments => "AC",
            Self::Rejected => "RE",
            Self::Cancelled => "CA",
            Self::Informative => "IF",
            Self::AsBuilt => "AS",
        }
    }
}

impl fmt::Display for Qualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Qualification {
    type Err = docflow_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|q| q.as_str() == normalized || q.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                docflow_core::AppError::validation(format!("Invalid qualification: '{s}'"))
            })
    }
}
