//! GN division (GN UID) lookups.

use std::sync::Arc;

use relief_auth::PolicyEvaluator;
use relief_core::error::AppError;
use relief_database::GnDivisionStore;
use relief_entity::access::{Action, Resource};
use relief_entity::geo::GnDivision;

use crate::context::RequestContext;

/// Read-only access to GN division reference data.
#[derive(Debug, Clone)]
pub struct GnDivisionService {
    divisions: Arc<dyn GnDivisionStore>,
    policy: Arc<PolicyEvaluator>,
}

impl GnDivisionService {
    /// Creates a new GN division service.
    pub fn new(divisions: Arc<dyn GnDivisionStore>, policy: Arc<PolicyEvaluator>) -> Self {
        Self { divisions, policy }
    }

    fn authorize(&self, ctx: &RequestContext) -> Result<(), AppError> {
        self.policy
            .authorize(&ctx.subject(), Resource::GnUid, Action::Read)
    }

    /// Division details by GN UID code.
    pub async fn get(&self, ctx: &RequestContext, code: &str) -> Result<GnDivision, AppError> {
        self.authorize(ctx)?;
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::validation("GN UID is required"));
        }
        self.divisions
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found(format!("GN division '{code}' not found")))
    }

    /// Every division in a district, ordered by name.
    pub async fn list(&self, ctx: &RequestContext, district: &str) -> Result<Vec<GnDivision>, AppError> {
        self.authorize(ctx)?;
        let district = district.trim();
        if district.is_empty() {
            return Err(AppError::validation("District is required"));
        }
        self.divisions.list_by_district(district).await
    }
}
