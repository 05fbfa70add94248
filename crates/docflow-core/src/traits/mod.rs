//! Core traits defined in `docflow-core` and implemented by other crates.

pub mod event_sink;
pub mod repository;

pub use event_sink::EventSink;
pub use repository::{Identifiable, Repository};
