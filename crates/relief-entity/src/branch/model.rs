//! Branch office model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Operational status of a branch office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "branch_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BranchStatus {
    /// Open for operations.
    Active,
    /// Closed (soft-deleted).
    Inactive,
}

/// A relief distribution branch office.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Branch {
    /// Unique branch identifier.
    pub id: Uuid,
    /// Branch name (unique).
    pub name: String,
    /// District served.
    pub district: String,
    /// Street address.
    pub address: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Operational status.
    pub status: BranchStatus,
    /// When the branch was created.
    pub created_at: DateTime<Utc>,
    /// When the branch was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to open a branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBranch {
    /// Branch name.
    pub name: String,
    /// District served.
    pub district: String,
    /// Street address.
    pub address: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
}

/// Editable branch fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBranch {
    /// New name.
    pub name: Option<String>,
    /// New district.
    pub district: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New phone.
    pub phone: Option<String>,
}
