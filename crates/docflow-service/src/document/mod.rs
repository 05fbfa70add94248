//! Document listing, workflow and metadata operations.

pub mod service;

pub use service::{DocumentService, TransitionResult};
