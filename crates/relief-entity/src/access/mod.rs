//! Resource and action identifiers consulted by the policy table.

pub mod action;
pub mod resource;

pub use action::Action;
pub use resource::Resource;
