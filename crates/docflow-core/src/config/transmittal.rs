//! Transmittal (GRD) generation configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings for automatically generated transmittal documents.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TransmittalConfig {
    /// Prefix of generated codes (`GRD-1A2B3C4D`).
    #[validate(length(min = 1, max = 16))]
    pub code_prefix: String,
    /// Prefix of the synthesized title; related codes follow it.
    pub title_prefix: String,
    /// Discipline assigned to generated transmittals.
    pub discipline: String,
    /// Nature assigned to generated transmittals.
    pub nature: String,
    /// Display name of the automated actor stamped on the seed version.
    pub system_actor_name: String,
    /// Comment on the seed version.
    pub generation_comment: String,
    /// How many codes to try before giving up on a collision.
    #[validate(range(min = 1, max = 32))]
    pub max_code_attempts: u32,
}

impl Default for TransmittalConfig {
    fn default() -> Self {
        Self {
            code_prefix: "GRD".to_string(),
            title_prefix: "Transmittal".to_string(),
            discipline: "Management - MG".to_string(),
            nature: "GRD".to_string(),
            system_actor_name: "System (auto)".to_string(),
            generation_comment: "Generated automatically.".to_string(),
            max_code_attempts: 5,
        }
    }
}
