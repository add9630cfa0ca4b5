//! Relief request entities.

pub mod category;
pub mod model;

pub use category::ReliefCategory;
pub use model::{CreateReliefRequest, ReliefRequest, ReliefRequestFilter, UpdateReliefRequest};
