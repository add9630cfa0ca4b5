//! Policy table inspection.

pub mod service;

pub use service::{AccessService, CheckRequest, Permission};
