//! Reporting and dashboard services.

pub mod dashboard;
pub mod export;
pub mod service;

pub use dashboard::{DashboardOverview, DashboardService};
pub use service::{CountBreakdown, ReportFilter, ReportService, ReportSummary};
