//! # docflow-entity
//!
//! Domain entity models for DocFlow. Every struct in this crate is a
//! stored record or a value object embedded in one. All entities derive
//! `Debug`, `Clone`, `Serialize` and `Deserialize`.

pub mod catalog;
pub mod document;
pub mod project;
pub mod user;

pub(crate) mod validation;
