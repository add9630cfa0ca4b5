//! # relief-auth
//!
//! Authentication and authorization for Relief Desk.
//!
//! ## Modules
//!
//! - `jwt`: access and refresh token claims, signing and verification
//! - `password`: Argon2id hashing and password policy
//! - `abac`: the static policy table and its evaluator
//! - `session`: login, refresh rotation and access-token authentication

pub mod abac;
pub mod jwt;
pub mod password;
pub mod session;

pub use abac::{Decision, PolicyEvaluator, Subject};
pub use jwt::{AccessClaims, JwtDecoder, JwtEncoder, RefreshClaims, TokenPair};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::SessionManager;
