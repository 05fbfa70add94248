//! Mutable list-of-values catalog for categorical document fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use docflow_core::AppError;
use docflow_core::config::catalog::CatalogConfig;

/// Which catalog list a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    /// Disciplines.
    Discipline,
    /// Document natures.
    Nature,
    /// Issuers.
    Issuer,
}

impl CatalogKind {
    /// Return the key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discipline => "discipline",
            Self::Nature => "nature",
            Self::Issuer => "issuer",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CatalogKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().trim_end_matches('s') {
            "discipline" => Ok(Self::Discipline),
            "nature" => Ok(Self::Nature),
            "issuer" => Ok(Self::Issuer),
            _ => Err(AppError::validation(format!(
                "Invalid catalog: '{s}'. Expected one of: discipline, nature, issuer"
            ))),
        }
    }
}

/// Allowed values for discipline, nature and issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemCatalog {
    /// Allowed disciplines.
    pub disciplines: Vec<String>,
    /// Allowed natures.
    pub natures: Vec<String>,
    /// Allowed issuers.
    pub issuers: Vec<String>,
}

impl SystemCatalog {
    /// The values of one list.
    pub fn values(&self, kind: CatalogKind) -> &[String] {
        match kind {
            CatalogKind::Discipline => &self.disciplines,
            CatalogKind::Nature => &self.natures,
            CatalogKind::Issuer => &self.issuers,
        }
    }

    fn values_mut(&mut self, kind: CatalogKind) -> &mut Vec<String> {
        match kind {
            CatalogKind::Discipline => &mut self.disciplines,
            CatalogKind::Nature => &mut self.natures,
            CatalogKind::Issuer => &mut self.issuers,
        }
    }

    /// Whether `value` is listed under `kind`.
    pub fn contains(&self, kind: CatalogKind, value: &str) -> bool {
        self.values(kind).iter().any(|v| v == value)
    }

    /// Append a value. Blank values and duplicates are rejected.
    pub fn add(&mut self, kind: CatalogKind, value: &str) -> Result<(), AppError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AppError::validation(format!("A {kind} must not be empty")));
        }
        if self.contains(kind, value) {
            return Err(AppError::conflict(format!(
                "'{value}' is already a listed {kind}"
            )));
        }
        self.values_mut(kind).push(value.to_string());
        Ok(())
    }

    /// Remove a value.
    pub fn remove(&mut self, kind: CatalogKind, value: &str) -> Result<(), AppError> {
        let list = self.values_mut(kind);
        let before = list.len();
        list.retain(|v| v != value);
        if list.len() == before {
            return Err(AppError::not_found(format!("'{value}' is not a listed {kind}")));
        }
        Ok(())
    }
}

impl From<CatalogConfig> for SystemCatalog {
    fn from(config: CatalogConfig) -> Self {
        Self {
            disciplines: config.disciplines,
            natures: config.natures,
            issuers: config.issuers,
        }
    }
}

impl Default for SystemCatalog {
    fn default() -> Self {
        CatalogConfig::default().into()
    }
}
