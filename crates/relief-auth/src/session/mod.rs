//! Login, refresh rotation and access-token authentication.

pub mod manager;

pub use manager::{LoginResult, SessionManager};
