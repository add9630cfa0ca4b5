//! Token payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use relief_entity::user::UserRole;

use crate::abac::Subject;

/// Access token payload. Role and district ride along so that a request can
/// be authorized without a database read; a role change therefore takes
/// effect at the next refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User ID.
    pub sub: Uuid,
    pub username: String,
    pub role: UserRole,
    pub district: Option<String>,
    /// Unix seconds.
    pub iat: i64,
    /// Unix seconds.
    pub exp: i64,
}

impl AccessClaims {
    pub fn subject(&self) -> Subject {
        Subject::new(self.role, self.district.clone())
    }
}

/// Refresh token payload. Status and role are re-read from the user store on
/// every refresh, so only the ID is carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// User ID.
    pub sub: Uuid,
    /// Fresh per issuance, so two rotations in the same second differ.
    pub jti: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl RefreshClaims {
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}
