//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional TOML file and `DOCFLOW__`-prefixed environment variables.
//! Every section carries serde defaults, so an empty source is valid.

pub mod catalog;
pub mod logging;
pub mod store;
pub mod transmittal;
pub mod workflow;

use serde::{Deserialize, Serialize};
use validator::Validate;

use self::catalog::CatalogConfig;
use self::logging::LoggingConfig;
use self::store::StoreConfig;
use self::transmittal::TransmittalConfig;
use self::workflow::WorkflowConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Workflow engine settings.
    #[validate(nested)]
    pub workflow: WorkflowConfig,
    /// Transmittal (GRD) generation settings.
    #[validate(nested)]
    pub transmittal: TransmittalConfig,
    /// Default list-of-values catalog.
    pub catalog: CatalogConfig,
    /// Snapshot store settings.
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Layers, lowest precedence first: built-in defaults, the TOML file at
    /// `path` (or `config/default.toml` when absent, not required), then
    /// environment variables prefixed with `DOCFLOW` using `__` as the
    /// section separator (`DOCFLOW__LOGGING__LEVEL=debug`).
    pub fn load(path: Option<&str>) -> Result<Self, AppError> {
        let file = match path {
            Some(p) => config::File::with_name(p).required(true),
            None => config::File::with_name("config/default").required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("DOCFLOW")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let app: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        app.validate()?;
        Ok(app)
    }
}
