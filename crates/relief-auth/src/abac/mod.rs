//! Attribute-based access control: a static policy table keyed on
//! (resource, action), evaluated against the caller's role and district.

pub mod evaluator;
pub mod policies;

pub use evaluator::{Decision, DecisionReason, PolicyEvaluator, PolicyView};
pub use policies::{POLICIES, Policy, Subject};
