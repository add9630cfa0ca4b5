//! # relief-client
//!
//! Programmatic client for the Relief Desk API that keeps the session the
//! way a browser would: the access token lives in memory, the refresh token
//! lives in the cookie jar, and a request answered with 401 triggers exactly
//! one refresh followed by one retry.

pub mod error;
pub mod model;
pub mod session;

pub use error::ClientError;
pub use model::{Session, SessionUser};
pub use session::SessionStore;
