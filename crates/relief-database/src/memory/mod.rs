//! In-memory store implementations for single-process runs and tests.
//!
//! Records live in insertion order behind a Tokio `RwLock`, so "newest
//! first" listings are simply the reversed vector.

pub mod branch;
pub mod citizen;
pub mod gn_division;
pub mod relief_request;
pub mod user;

pub use branch::MemoryBranchStore;
pub use citizen::MemoryCitizenStore;
pub use gn_division::MemoryGnDivisionStore;
pub use relief_request::MemoryReliefRequestStore;
pub use user::MemoryUserStore;
