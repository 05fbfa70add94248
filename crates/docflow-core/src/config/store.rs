//! Snapshot store configuration.

use serde::{Deserialize, Serialize};

/// Where the CLI keeps its JSON state between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the JSON snapshot file.
    pub snapshot_path: String,
    /// Pretty-print the snapshot when writing it back.
    pub pretty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "data/docflow.json".to_string(),
            pretty: true,
        }
    }
}
