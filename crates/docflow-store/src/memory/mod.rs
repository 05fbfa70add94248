//! In-memory store implementations.

pub mod catalog;
pub mod event_log;
pub mod repository;
pub mod store;

pub use catalog::CatalogStore;
pub use event_log::MemoryEventLog;
pub use repository::MemoryRepository;
pub use store::MemoryStore;
