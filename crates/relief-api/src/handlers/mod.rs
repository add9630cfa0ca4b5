//! HTTP handlers, one module per resource.

pub mod abac;
pub mod auth;
pub mod branch;
pub mod citizen;
pub mod health;
pub mod lookup;
pub mod relief;
pub mod report;
pub mod user;
