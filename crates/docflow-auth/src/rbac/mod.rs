//! Role-based workflow authorization.

pub mod enforcer;
pub mod policies;

pub use enforcer::WorkflowEnforcer;
pub use policies::{PolicyRule, VersionGuard, WorkflowAction, WorkflowPolicies};
