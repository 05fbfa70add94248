//! Default list-of-values catalog.

use serde::{Deserialize, Serialize};

/// Initial allowed values for the categorical document fields.
///
/// The running catalog is mutable (see the catalog service); these are
/// only the values it starts from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Allowed disciplines.
    pub disciplines: Vec<String>,
    /// Allowed document natures.
    pub natures: Vec<String>,
    /// Allowed issuers.
    pub issuers: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let mut natures: Vec<String> = [
            "Meeting Minutes - AT",
            "Backup - BK",
            "Configuration - CO",
            "Data Book - DB",
            "Construction / Survey Diagram - DCT",
            "Interconnection Diagram - DI",
            "Functional / Logic Diagram - DFL",
            "Technical Specification - ET",
            "Selectivity Study - ES",
            "Cable List - LC",
            "Bill of Materials - LM",
            "Checklist - LV",
            "Installation and Maintenance Manual - MI",
            "Operation Manual - MO",
            "Training Manual - MT",
            "Descriptive Memorandum - MD",
            "Inspection and Test Plan - PIT",
            "Quality Plan - PQ",
            "Training Plan - PL",
            "Test Procedure - PT",
            "Adequacy Report - RAD",
            "Analysis Report - RA",
            "Test Report - RT",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        natures.sort();

        Self {
            disciplines: [
                "Electrical - EL",
                "Civil - CV",
                "Electromechanical - EM",
                "General - GE",
                "Management - MG",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            natures,
            issuers: ["Internal Engineering", "Supplier A", "Consortium", "Client"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}
