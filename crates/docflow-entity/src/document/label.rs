//! Version label value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use docflow_core::AppError;

/// Longest label accepted.
const MAX_LABEL_LEN: usize = 12;

/// A document revision label: "0A", "0B" for technical documents,
/// "00", "01" for the others.
///
/// Labels are ASCII alphanumeric and never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionLabel(String);

impl VersionLabel {
    /// Parse and validate a label.
    pub fn parse(value: &str) -> Result<Self, AppError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AppError::validation("Version label must not be empty"));
        }
        if value.len() > MAX_LABEL_LEN || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::validation(format!(
                "Invalid version label: '{value}'. Expected up to {MAX_LABEL_LEN} letters or digits"
            )));
        }
        Ok(Self(value.to_string()))
    }

    /// Build a label from a literal known to be valid.
    pub(crate) fn new_unchecked(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Return the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the label is purely numeric ("00", "01", ...).
    ///
    /// Client approval of a numeric revision releases it for execution;
    /// an alphanumeric one goes back to moderation.
    pub fn is_numeric(&self) -> bool {
        self.0.chars().all(|c| c.is_ascii_digit())
    }

    /// Derive the next label in the same scheme.
    ///
    /// `"01"` → `"02"`, `"09"` → `"10"`, `"0A"` → `"0B"`, `"0Z"` → `"1A"`.
    /// Returns `None` when no successor can be derived (e.g. `"AZ"`).
    pub fn successor(&self) -> Option<Self> {
        if self.is_numeric() {
            return increment_digits(&self.0).map(Self);
        }

        let last = self.0.chars().last()?;
        let prefix = &self.0[..self.0.len() - 1];

        if last.is_ascii_alphabetic() {
            if !last.eq_ignore_ascii_case(&'z') {
                let bumped = char::from(last as u8 + 1);
                return Some(Self(format!("{prefix}{bumped}")));
            }
            let restart = if last.is_ascii_uppercase() { 'A' } else { 'a' };
            let head = if prefix.is_empty() {
                Some("1".to_string())
            } else if prefix.chars().all(|c| c.is_ascii_digit()) {
                increment_digits(prefix)
            } else {
                None
            }?;
            return Some(Self(format!("{head}{restart}")));
        }

        let split = self
            .0
            .rfind(|c: char| !c.is_ascii_digit())
            .map(|idx| idx + 1)?;
        let (head, digits) = self.0.split_at(split);
        increment_digits(digits).map(|d| Self(format!("{head}{d}")))
    }
}

/// Increment a decimal string, keeping its zero-padded width.
fn increment_digits(digits: &str) -> Option<String> {
    let value: u64 = digits.parse().ok()?;
    let next = value.checked_add(1)?;
    Some(format!("{next:0width$}", width = digits.len()))
}

impl fmt::Display for VersionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VersionLabel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VersionLabel {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VersionLabel> for String {
    fn from(label: VersionLabel) -> String {
        label.0
    }
}
