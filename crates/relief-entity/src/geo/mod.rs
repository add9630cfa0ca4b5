//! Administrative geography reference data.

pub mod model;

pub use model::GnDivision;
