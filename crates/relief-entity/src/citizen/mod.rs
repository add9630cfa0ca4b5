//! Citizen record entities.

pub mod model;

pub use model::{Citizen, CitizenFilter, CreateCitizen, UpdateCitizen};
