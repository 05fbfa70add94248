//! # docflow-auth
//!
//! Authorization for the DocFlow workflow.
//!
//! ## Modules
//!
//! - `rbac`: role-gated workflow rule table and its enforcer
//! - `access`: project scope checks and client history visibility

pub mod access;
pub mod rbac;

pub use access::ProjectScope;
pub use rbac::{WorkflowAction, WorkflowEnforcer, WorkflowPolicies};
