//! Relief request entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::ReliefCategory;
use crate::case::CaseStatus;

/// A request for assistance filed on behalf of a citizen.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReliefRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// The citizen this request is for.
    pub citizen_id: Uuid,
    /// Kind of assistance.
    pub category: ReliefCategory,
    /// Free-text description of the need.
    pub description: String,
    /// District, copied from the citizen at creation.
    pub district: String,
    /// Review status.
    pub status: CaseStatus,
    /// Reviewer's note (required on rejection).
    pub review_note: Option<String>,
    /// Reviewer's user ID.
    pub reviewed_by: Option<Uuid>,
    /// `false` once soft-deleted.
    pub is_active: bool,
    /// The user who filed the request.
    pub created_by: Uuid,
    /// When the request was filed.
    pub created_at: DateTime<Utc>,
    /// When the request was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to file a relief request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReliefRequest {
    /// Target citizen.
    pub citizen_id: Uuid,
    /// Kind of assistance.
    pub category: ReliefCategory,
    /// Description of the need.
    pub description: String,
    /// District of the citizen.
    pub district: String,
    /// Filing user.
    pub created_by: Uuid,
}

/// Editable request fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateReliefRequest {
    /// New category.
    pub category: Option<ReliefCategory>,
    /// New description.
    pub description: Option<String>,
}

/// Listing filter for relief requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReliefRequestFilter {
    /// Only requests in this district.
    pub district: Option<String>,
    /// Only requests with this status.
    pub status: Option<CaseStatus>,
    /// Only requests of this category.
    pub category: Option<ReliefCategory>,
    /// Only requests for this citizen.
    pub citizen_id: Option<Uuid>,
    /// Created at or after.
    pub from: Option<DateTime<Utc>>,
    /// Created strictly before.
    pub to: Option<DateTime<Utc>>,
    /// Include soft-deleted requests.
    #[serde(default)]
    pub include_inactive: bool,
}

impl ReliefRequestFilter {
    /// Evaluate the filter against a request in memory.
    pub fn matches(&self, request: &ReliefRequest) -> bool {
        if !self.include_inactive && !request.is_active {
            return false;
        }
        if let Some(district) = &self.district {
            if !request.district.eq_ignore_ascii_case(district) {
                return false;
            }
        }
        if self.status.is_some_and(|s| s != request.status) {
            return false;
        }
        if self.category.is_some_and(|c| c != request.category) {
            return false;
        }
        if self.citizen_id.is_some_and(|c| c != request.citizen_id) {
            return false;
        }
        if self.from.is_some_and(|from| request.created_at < from) {
            return false;
        }
        if self.to.is_some_and(|to| request.created_at >= to) {
            return false;
        }
        true
    }
}
