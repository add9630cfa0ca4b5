//! # relief-service
//!
//! Business logic service layer for Relief Desk. Each service holds the
//! store handles it needs plus the policy evaluator, and authorizes the
//! caller before reading or writing anything.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod access;
pub mod branch;
pub mod citizen;
pub mod context;
pub mod lookup;
mod period;
pub mod relief;
pub mod report;
pub mod review;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use access::AccessService;
pub use branch::BranchService;
pub use citizen::CitizenService;
pub use context::RequestContext;
pub use lookup::{AutofillService, GnDivisionService};
pub use relief::ReliefRequestService;
pub use report::{DashboardService, ReportService};
pub use user::{AdminUserService, UserService};
