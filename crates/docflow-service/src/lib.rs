//! # docflow-service
//!
//! Workflow engines and the services that drive them. The engines under
//! `workflow` are synchronous and never touch the store: they take the
//! current state plus an explicit actor and timestamp and return the new
//! state. The services load from the store, run an engine, persist every
//! changed entity in one `save_all` call and then publish domain events.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod admin;
pub mod catalog;
pub mod context;
pub mod document;
pub mod report;
pub mod workflow;

#[cfg(test)]
pub(crate) mod fixtures;

pub use admin::AdminService;
pub use catalog::CatalogService;
pub use context::ActorContext;
pub use document::DocumentService;
pub use report::{DashboardReport, DashboardService};
pub use workflow::{
    BatchEngine, DocumentFactory, MetadataAuditor, ReissueEngine, TransitionEngine,
    TransmittalGenerator,
};
