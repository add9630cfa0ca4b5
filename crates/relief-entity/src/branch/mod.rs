//! Branch office entities.

pub mod model;

pub use model::{Branch, BranchStatus, CreateBranch, UpdateBranch};
