//! Case review status shared by citizen records and relief requests.

pub mod status;

pub use status::CaseStatus;
