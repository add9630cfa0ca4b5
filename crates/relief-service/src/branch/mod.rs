//! Branch office services.

pub mod service;

pub use service::{BranchQuery, BranchService, CreateBranchRequest, UpdateBranchRequest};
