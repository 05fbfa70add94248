//! Project entity model.

use serde::{Deserialize, Serialize};
use validator::Validate;

use docflow_core::traits::Identifiable;
use docflow_core::types::ProjectId;

/// An engineering project that owns documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Unique short code.
    pub code: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Work-breakdown structure code.
    pub wbs: String,
    /// Site (substation or lot) identifier.
    pub substation: String,
    /// Contracting client.
    pub direct_client: String,
    /// End client.
    pub final_client: String,
}

impl Identifiable for Project {
    type Id = ProjectId;

    fn id(&self) -> ProjectId {
        self.id
    }
}

/// Data required to create a project. Every field but the description is
/// mandatory.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProject {
    /// Project name.
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub name: String,
    /// Unique short code.
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub code: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Work-breakdown structure code.
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub wbs: String,
    /// Site identifier.
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub substation: String,
    /// Contracting client.
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub direct_client: String,
    /// End client.
    #[validate(custom(function = "crate::validation::not_blank"))]
    pub final_client: String,
}

impl CreateProject {
    /// Materialize the project under a fresh id.
    pub fn into_project(self) -> Project {
        Project {
            id: ProjectId::new(),
            name: self.name.trim().to_string(),
            code: self.code.trim().to_string(),
            description: self.description,
            wbs: self.wbs.trim().to_string(),
            substation: self.substation.trim().to_string(),
            direct_client: self.direct_client.trim().to_string(),
            final_client: self.final_client.trim().to_string(),
        }
    }
}
