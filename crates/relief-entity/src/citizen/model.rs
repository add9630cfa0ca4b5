//! Citizen entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::case::CaseStatus;

/// A citizen registered for relief, identified by national ID number.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Citizen {
    /// Unique record identifier.
    pub id: Uuid,
    /// National identity card number (unique).
    pub nic: String,
    /// Full legal name.
    pub full_name: String,
    /// Residential address.
    pub address: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// District of residence.
    pub district: String,
    /// GN division code.
    pub gn_division: Option<String>,
    /// Number of people in the household.
    pub household_size: i32,
    /// Verification status.
    pub status: CaseStatus,
    /// Reviewer's note (required on rejection).
    pub review_note: Option<String>,
    /// Reviewer's user ID.
    pub reviewed_by: Option<Uuid>,
    /// `false` once soft-deleted.
    pub is_active: bool,
    /// The user who registered the citizen.
    pub created_by: Uuid,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to register a citizen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCitizen {
    /// National identity card number.
    pub nic: String,
    /// Full legal name.
    pub full_name: String,
    /// Residential address.
    pub address: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// District of residence.
    pub district: String,
    /// GN division code.
    pub gn_division: Option<String>,
    /// Household size.
    pub household_size: i32,
    /// Registering user.
    pub created_by: Uuid,
}

/// Editable citizen fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCitizen {
    /// New full name.
    pub full_name: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New GN division code.
    pub gn_division: Option<String>,
    /// New household size.
    pub household_size: Option<i32>,
}

/// Listing filter for citizens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitizenFilter {
    /// Only citizens in this district.
    pub district: Option<String>,
    /// Only citizens with this status.
    pub status: Option<CaseStatus>,
    /// Match on NIC or name.
    pub search: Option<String>,
    /// Include soft-deleted records.
    #[serde(default)]
    pub include_inactive: bool,
}

impl CitizenFilter {
    /// Evaluate the filter against a citizen in memory.
    pub fn matches(&self, citizen: &Citizen) -> bool {
        if !self.include_inactive && !citizen.is_active {
            return false;
        }
        if let Some(district) = &self.district {
            if !citizen.district.eq_ignore_ascii_case(district) {
                return false;
            }
        }
        if self.status.is_some_and(|s| s != citizen.status) {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !citizen.nic.to_lowercase().contains(&needle)
                && !citizen.full_name.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}
