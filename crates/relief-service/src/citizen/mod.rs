//! Citizen record services.

pub mod nic;
pub mod service;

pub use nic::normalize_nic;
pub use service::{CitizenQuery, CitizenService, CreateCitizenRequest, UpdateCitizenRequest};
