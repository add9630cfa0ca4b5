//! Wire types the client reads back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Success envelope.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Error envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
}

/// The user a session belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Role tag.
    pub role: String,
    /// District, once assigned.
    pub district: Option<String>,
    /// Account status.
    pub status: String,
}

/// Body of a login or refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for protected calls.
    pub access_token: String,
    /// When the access token expires.
    pub access_expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: SessionUser,
}
