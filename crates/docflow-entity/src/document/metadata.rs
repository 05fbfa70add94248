//! Editable metadata fields and their typed comparator table.
//!
//! Each editable field is a variant of [`MetadataField`]; an edit is a
//! [`FieldUpdate`] carrying a value of that field's type. Comparison goes
//! through [`FieldValue`], so text, dates and flags are compared as what
//! they are rather than as stringified values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use docflow_core::AppError;

use super::model::Document;

/// An editable metadata field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataField {
    /// Title (required).
    Title,
    /// Discipline (required).
    Discipline,
    /// Nature (required).
    Nature,
    /// Issuer (required).
    Issuer,
    /// Client-side code.
    GeCode,
    /// Accessed-party code.
    AccessCode,
    /// TAF/TAC reference.
    TafTac,
    /// Deadline.
    ForecastDate,
    /// Informative flag.
    Informative,
    /// As-built flag.
    AsBuilt,
}

impl MetadataField {
    /// Every editable field.
    pub const ALL: [MetadataField; 10] = [
        Self::Title,
        Self::Discipline,
        Self::Nature,
        Self::Issuer,
        Self::GeCode,
        Self::AccessCode,
        Self::TafTac,
        Self::ForecastDate,
        Self::Informative,
        Self::AsBuilt,
    ];

    /// Field key as it appears in changelogs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Discipline => "discipline",
            Self::Nature => "nature",
            Self::Issuer => "issuer",
            Self::GeCode => "ge_code",
            Self::AccessCode => "access_code",
            Self::TafTac => "taf_tac",
            Self::ForecastDate => "forecast_date",
            Self::Informative => "informative",
            Self::AsBuilt => "as_built",
        }
    }

    /// Whether the field must never be blank.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Self::Title | Self::Discipline | Self::Nature | Self::Issuer
        )
    }

    /// Read the current value of this field from a document.
    ///
    /// Blank optional text reads as unset, matching [`FieldUpdate::value`].
    pub fn read(&self, doc: &Document) -> FieldValue {
        match self {
            Self::Title => FieldValue::Text(Some(doc.title.clone())),
            Self::Discipline => FieldValue::Text(Some(doc.discipline.clone())),
            Self::Nature => FieldValue::Text(Some(doc.nature.clone())),
            Self::Issuer => FieldValue::Text(Some(doc.issuer.clone())),
            Self::GeCode => FieldValue::Text(normalize_optional(&doc.ge_code)),
            Self::AccessCode => FieldValue::Text(normalize_optional(&doc.access_code)),
            Self::TafTac => FieldValue::Text(normalize_optional(&doc.taf_tac)),
            Self::ForecastDate => FieldValue::Date(doc.forecast_date),
            Self::Informative => FieldValue::Flag(doc.informative),
            Self::AsBuilt => FieldValue::Flag(doc.as_built),
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MetadataField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| AppError::validation(format!("Unknown metadata field: '{s}'")))
    }
}

/// A typed metadata value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Free text; `None` when unset.
    Text(Option<String>),
    /// Calendar date; `None` when unset.
    Date(Option<NaiveDate>),
    /// Boolean flag.
    Flag(bool),
}

impl FieldValue {
    /// Render for a changelog, using `placeholder` for unset values.
    pub fn render(&self, placeholder: &str) -> String {
        match self {
            Self::Text(Some(text)) => text.clone(),
            Self::Date(Some(date)) => date.format("%Y-%m-%d").to_string(),
            Self::Flag(flag) => flag.to_string(),
            Self::Text(None) | Self::Date(None) => placeholder.to_string(),
        }
    }
}

/// One field edit in a partial metadata update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldUpdate {
    /// New title.
    Title(String),
    /// New discipline.
    Discipline(String),
    /// New nature.
    Nature(String),
    /// New issuer.
    Issuer(String),
    /// New client-side code; `None` clears it.
    GeCode(Option<String>),
    /// New accessed-party code; `None` clears it.
    AccessCode(Option<String>),
    /// New TAF/TAC reference; `None` clears it.
    TafTac(Option<String>),
    /// New deadline; `None` clears it.
    ForecastDate(Option<NaiveDate>),
    /// New informative flag.
    Informative(bool),
    /// New as-built flag.
    AsBuilt(bool),
}

impl FieldUpdate {
    /// The field this update targets.
    pub fn field(&self) -> MetadataField {
        match self {
            Self::Title(_) => MetadataField::Title,
            Self::Discipline(_) => MetadataField::Discipline,
            Self::Nature(_) => MetadataField::Nature,
            Self::Issuer(_) => MetadataField::Issuer,
            Self::GeCode(_) => MetadataField::GeCode,
            Self::AccessCode(_) => MetadataField::AccessCode,
            Self::TafTac(_) => MetadataField::TafTac,
            Self::ForecastDate(_) => MetadataField::ForecastDate,
            Self::Informative(_) => MetadataField::Informative,
            Self::AsBuilt(_) => MetadataField::AsBuilt,
        }
    }

    /// The proposed value. Text is trimmed and blank optional text counts
    /// as unset.
    pub fn value(&self) -> FieldValue {
        match self {
            Self::Title(v) | Self::Discipline(v) | Self::Nature(v) | Self::Issuer(v) => {
                FieldValue::Text(Some(v.trim().to_string()))
            }
            Self::GeCode(v) | Self::AccessCode(v) | Self::TafTac(v) => {
                FieldValue::Text(normalize_optional(v))
            }
            Self::ForecastDate(v) => FieldValue::Date(*v),
            Self::Informative(v) | Self::AsBuilt(v) => FieldValue::Flag(*v),
        }
    }

    /// Reject blank values for required fields.
    pub fn validate(&self) -> Result<(), AppError> {
        match self {
            Self::Title(v) | Self::Discipline(v) | Self::Nature(v) | Self::Issuer(v)
                if v.trim().is_empty() =>
            {
                Err(AppError::validation(format!(
                    "Field '{}' must not be empty",
                    self.field()
                )))
            }
            _ => Ok(()),
        }
    }

    /// Write the value into the document.
    pub fn apply_to(&self, doc: &mut Document) {
        match self {
            Self::Title(v) => doc.title = v.trim().to_string(),
            Self::Discipline(v) => doc.discipline = v.trim().to_string(),
            Self::Nature(v) => doc.nature = v.trim().to_string(),
            Self::Issuer(v) => doc.issuer = v.trim().to_string(),
            Self::GeCode(v) => doc.ge_code = normalize_optional(v),
            Self::AccessCode(v) => doc.access_code = normalize_optional(v),
            Self::TafTac(v) => doc.taf_tac = normalize_optional(v),
            Self::ForecastDate(v) => doc.forecast_date = *v,
            Self::Informative(v) => doc.informative = *v,
            Self::AsBuilt(v) => doc.as_built = *v,
        }
    }

    /// Parse a `field=value` pair as typed by a user.
    ///
    /// An empty value clears optional fields; flags accept
    /// `true/false/yes/no/1/0`; dates use `YYYY-MM-DD`.
    pub fn parse_assignment(input: &str) -> Result<Self, AppError> {
        let (key, raw) = input.split_once('=').ok_or_else(|| {
            AppError::validation(format!("Expected field=value, got '{input}'"))
        })?;
        let field: MetadataField = key.parse()?;
        let raw = raw.trim();
        let text = || (!raw.is_empty()).then(|| raw.to_string());

        let update = match field {
            MetadataField::Title => Self::Title(raw.to_string()),
            MetadataField::Discipline => Self::Discipline(raw.to_string()),
            MetadataField::Nature => Self::Nature(raw.to_string()),
            MetadataField::Issuer => Self::Issuer(raw.to_string()),
            MetadataField::GeCode => Self::GeCode(text()),
            MetadataField::AccessCode => Self::AccessCode(text()),
            MetadataField::TafTac => Self::TafTac(text()),
            MetadataField::ForecastDate => Self::ForecastDate(if raw.is_empty() {
                None
            } else {
                Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                    AppError::validation(format!("Invalid date '{raw}': {e}"))
                })?)
            }),
            MetadataField::Informative => Self::Informative(parse_flag(raw)?),
            MetadataField::AsBuilt => Self::AsBuilt(parse_flag(raw)?),
        };
        Ok(update)
    }
}

fn normalize_optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn parse_flag(raw: &str) -> Result<bool, AppError> {
    match raw.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(AppError::validation(format!("Invalid flag value: '{raw}'"))),
    }
}
