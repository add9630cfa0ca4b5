//! Account records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;
use super::status::UserStatus;

/// A staff member or volunteer account. Never serialized with its hash.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    /// Argon2id PHC string.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: UserRole,
    /// Operating district. Admins have none; volunteers get one on approval.
    pub district: Option<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Insert payload; the password is already hashed by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: UserRole,
    pub district: Option<String>,
    pub status: UserStatus,
}

/// Profile fields an admin may change. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub district: Option<String>,
}

/// Admin user listing filter. All set fields must match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFilter {
    pub status: Option<UserStatus>,
    pub role: Option<UserRole>,
    /// Compared case-insensitively.
    pub district: Option<String>,
    /// Substring of username, email or full name, case-insensitive.
    pub search: Option<String>,
}

impl UserFilter {
    /// In-memory evaluation, mirrored by the SQL in the Postgres store.
    pub fn matches(&self, user: &User) -> bool {
        if self.status.is_some_and(|s| s != user.status) {
            return false;
        }
        if self.role.is_some_and(|r| r != user.role) {
            return false;
        }
        if let Some(district) = &self.district {
            if !user
                .district
                .as_deref()
                .is_some_and(|d| d.eq_ignore_ascii_case(district))
            {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = user.username.to_lowercase().contains(&needle)
                || user
                    .email
                    .as_deref()
                    .is_some_and(|e| e.to_lowercase().contains(&needle))
                || user
                    .full_name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }
}
