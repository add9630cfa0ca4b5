//! # relief-database
//!
//! Store traits for every Relief Desk entity, with a PostgreSQL
//! implementation (`repositories`) and an in-memory implementation
//! (`memory`) used by tests and local demos.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{BranchStore, CitizenStore, GnDivisionStore, ReliefRequestStore, Stores, UserStore};
