//! # docflow-store
//!
//! Stand-in for the external document store: DashMap-backed repositories,
//! an in-memory event log, and JSON snapshot persistence so the CLI keeps
//! state between runs.

pub mod memory;
pub mod seed;
pub mod snapshot;

pub use memory::{CatalogStore, MemoryEventLog, MemoryRepository, MemoryStore};
pub use snapshot::Snapshot;
