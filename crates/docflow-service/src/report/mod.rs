//! Reporting over the document set.

pub mod dashboard;

pub use dashboard::{DashboardReport, DashboardService, DeadlineItem, StatusCount};
