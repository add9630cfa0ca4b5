//! Roles used by the policy table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a subject can hold when the policy table is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// System administrator with access to every district.
    Admin,
    /// District relief officer; reviews cases in their district.
    Officer,
    /// Field volunteer; registers citizens and files requests.
    Volunteer,
}

impl UserRole {
    /// Every role, in descending privilege order.
    pub const ALL: [UserRole; 3] = [Self::Admin, Self::Officer, Self::Volunteer];

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Officer => "officer",
            Self::Volunteer => "volunteer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = relief_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                relief_core::AppError::validation(format!(
                    "Unknown role '{wanted}' (use admin, officer or volunteer)"
                ))
            })
    }
}
