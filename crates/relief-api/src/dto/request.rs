//! Request DTOs that have no service-layer counterpart.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// `POST /api/auth/login` body. Only presence is checked here; the
/// credential check itself happens in the auth service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// `?district=` for the GN division lookup; blank is rejected by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistrictQuery {
    #[serde(default)]
    pub district: String,
}
