//! Project and user administration.

pub mod service;

pub use service::AdminService;
