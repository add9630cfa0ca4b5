//! Actions checked against the policy table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// CRUD action on a protected resource.
///
/// Status transitions (approve, reject, deactivate) are `Update` or `Delete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Create a new record.
    Create,
    /// Read or list records.
    Read,
    /// Modify a record or change its status.
    Update,
    /// Soft-delete a record.
    Delete,
}

impl Action {
    /// Every action.
    pub const ALL: [Action; 4] = [Self::Create, Self::Read, Self::Update, Self::Delete];

    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = relief_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "read" => Ok(Self::Read),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            _ => Err(relief_core::AppError::validation(format!(
                "Unknown action: '{s}'. Expected one of: create, read, update, delete"
            ))),
        }
    }
}
