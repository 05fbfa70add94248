//! Integration tests running the services over the in-memory store.

mod admin_test;
mod helpers;
mod snapshot_test;
mod workflow_test;
