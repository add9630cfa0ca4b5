//! Citizen registration, review and soft deletion.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use relief_auth::PolicyEvaluator;
use relief_core::error::AppError;
use relief_core::types::pagination::{PageRequest, PageResponse};
use relief_database::{CitizenStore, GnDivisionStore};
use relief_entity::access::{Action, Resource};
use relief_entity::case::CaseStatus;
use relief_entity::citizen::{Citizen, CitizenFilter, CreateCitizen, UpdateCitizen};

use super::nic::normalize_nic;
use crate::context::RequestContext;
use crate::review::{ReviewRequest, ensure_transition, non_blank};

/// Request to register a citizen.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCitizenRequest {
    /// National identity card number.
    pub nic: String,
    /// Full legal name.
    #[validate(length(min = 1, max = 200, message = "Full name is required"))]
    pub full_name: String,
    /// Residential address.
    #[validate(length(max = 500))]
    pub address: Option<String>,
    /// Contact phone.
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    /// District. Defaults to the caller's own district.
    pub district: Option<String>,
    /// GN division code.
    pub gn_division: Option<String>,
    /// Household size.
    #[serde(default = "one")]
    #[validate(range(min = 1, max = 100, message = "Household size must be between 1 and 100"))]
    pub household_size: i32,
}

fn one() -> i32 {
    1
}

/// Editable citizen fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCitizenRequest {
    /// New full name.
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    /// New address.
    #[validate(length(max = 500))]
    pub address: Option<String>,
    /// New phone.
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    /// New GN division code.
    pub gn_division: Option<String>,
    /// New household size.
    #[validate(range(min = 1, max = 100))]
    pub household_size: Option<i32>,
}

/// Query parameters for listing citizens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitizenQuery {
    /// District filter (admins only; others are pinned to their own).
    pub district: Option<String>,
    /// Status filter.
    pub status: Option<CaseStatus>,
    /// Match on NIC or name.
    pub search: Option<String>,
    /// Include soft-deleted records (admins only).
    #[serde(default)]
    pub include_inactive: bool,
}

/// Citizen record operations, scoped to the caller's district.
#[derive(Debug, Clone)]
pub struct CitizenService {
    citizens: Arc<dyn CitizenStore>,
    divisions: Arc<dyn GnDivisionStore>,
    policy: Arc<PolicyEvaluator>,
}

impl CitizenService {
    /// Creates a new citizen service.
    pub fn new(
        citizens: Arc<dyn CitizenStore>,
        divisions: Arc<dyn GnDivisionStore>,
        policy: Arc<PolicyEvaluator>,
    ) -> Self {
        Self {
            citizens,
            divisions,
            policy,
        }
    }

    fn authorize(&self, ctx: &RequestContext, action: Action) -> Result<(), AppError> {
        self.policy
            .authorize(&ctx.subject(), Resource::Citizen, action)
    }

    /// Load a record the caller may see.
    async fn load(&self, ctx: &RequestContext, id: Uuid) -> Result<Citizen, AppError> {
        let citizen = self
            .citizens
            .find_by_id(id)
            .await?
            .filter(|c| c.is_active || ctx.is_admin())
            .ok_or_else(|| AppError::not_found("Citizen not found"))?;
        ctx.ensure_district(&citizen.district)?;
        Ok(citizen)
    }

    /// Resolve a GN division code, checking it lies in `district`.
    async fn resolve_division(
        &self,
        code: Option<&str>,
        district: &str,
    ) -> Result<Option<String>, AppError> {
        let Some(code) = non_blank(code) else {
            return Ok(None);
        };
        let division = self
            .divisions
            .find_by_code(&code)
            .await?
            .ok_or_else(|| AppError::validation(format!("Unknown GN division '{code}'")))?;
        if !division.district.eq_ignore_ascii_case(district) {
            return Err(AppError::validation(format!(
                "GN division '{}' is not in {district}",
                division.code
            )));
        }
        Ok(Some(division.code))
    }

    /// List citizens visible to the caller, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: CitizenQuery,
        page: PageRequest,
    ) -> Result<PageResponse<Citizen>, AppError> {
        self.authorize(ctx, Action::Read)?;

        let filter = CitizenFilter {
            district: ctx.scope_filter(query.district)?,
            status: query.status,
            search: non_blank(query.search.as_deref()),
            include_inactive: query.include_inactive && ctx.is_admin(),
        };
        self.citizens.list(&filter, &page).await
    }

    /// Get one citizen.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Citizen, AppError> {
        self.authorize(ctx, Action::Read)?;
        self.load(ctx, id).await
    }

    /// Register a citizen. Starts `pending`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateCitizenRequest,
    ) -> Result<Citizen, AppError> {
        self.authorize(ctx, Action::Create)?;

        let district = ctx
            .scope_filter(req.district)?
            .ok_or_else(|| AppError::validation("District is required"))?;
        let nic = normalize_nic(&req.nic)?;
        let full_name = non_blank(Some(req.full_name.as_str()))
            .ok_or_else(|| AppError::validation("Full name is required"))?;
        let gn_division = self
            .resolve_division(req.gn_division.as_deref(), &district)
            .await?;

        let citizen = self
            .citizens
            .create(&CreateCitizen {
                nic,
                full_name,
                address: non_blank(req.address.as_deref()),
                phone: non_blank(req.phone.as_deref()),
                district,
                gn_division,
                household_size: req.household_size,
                created_by: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            citizen_id = %citizen.id,
            district = %citizen.district,
            "Citizen registered"
        );
        Ok(citizen)
    }

    /// Update editable fields.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateCitizenRequest,
    ) -> Result<Citizen, AppError> {
        self.authorize(ctx, Action::Update)?;
        let current = self.load(ctx, id).await?;

        if req.full_name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::validation("Full name cannot be blank"));
        }
        let gn_division = self
            .resolve_division(req.gn_division.as_deref(), &current.district)
            .await?;

        let update = UpdateCitizen {
            full_name: non_blank(req.full_name.as_deref()),
            address: req.address.map(|a| a.trim().to_string()),
            phone: req.phone.map(|p| p.trim().to_string()),
            gn_division,
            household_size: req.household_size,
        };

        self.citizens
            .update(id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("Citizen not found"))
    }

    /// Approve a pending citizen.
    pub async fn approve(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: ReviewRequest,
    ) -> Result<Citizen, AppError> {
        self.review(ctx, id, CaseStatus::Approved, req).await
    }

    /// Reject a pending citizen. A note is required.
    pub async fn reject(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: ReviewRequest,
    ) -> Result<Citizen, AppError> {
        self.review(ctx, id, CaseStatus::Rejected, req).await
    }

    async fn review(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        to: CaseStatus,
        req: ReviewRequest,
    ) -> Result<Citizen, AppError> {
        self.authorize(ctx, Action::Update)?;
        let note = req.note_for(to)?;

        let current = self.load(ctx, id).await?;
        if !current.is_active {
            return Err(AppError::conflict("Citizen has been deleted"));
        }
        ensure_transition(current.status, to)?;

        let reviewed = self
            .citizens
            .transition(id, current.status, to, note.as_deref(), ctx.user_id)
            .await?
            .ok_or_else(|| AppError::conflict("Citizen was reviewed concurrently"))?;

        info!(
            reviewer_id = %ctx.user_id,
            citizen_id = %id,
            status = to.as_str(),
            "Citizen reviewed"
        );
        Ok(reviewed)
    }

    /// Soft-delete a citizen.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<Citizen, AppError> {
        self.authorize(ctx, Action::Delete)?;

        let removed = self
            .citizens
            .deactivate(id)
            .await?
            .ok_or_else(|| AppError::not_found("Citizen not found"))?;

        info!(user_id = %ctx.user_id, citizen_id = %id, "Citizen deactivated");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use relief_core::error::ErrorKind;

    use super::*;
    use crate::testing;

    fn service() -> CitizenService {
        let d = testing::deps();
        CitizenService::new(d.stores.citizens, d.stores.gn_divisions, d.policy)
    }

    fn request(nic: &str) -> CreateCitizenRequest {
        CreateCitizenRequest {
            nic: nic.into(),
            full_name: "W. Silva".into(),
            address: Some("12 Sea Street".into()),
            phone: None,
            district: None,
            gn_division: None,
            household_size: 3,
        }
    }

    #[tokio::test]
    async fn test_volunteer_creates_in_own_district() {
        let svc = service();
        let ctx = testing::volunteer("Colombo");
        let mut req = request("199912345678");
        req.gn_division = Some("col-05-112".into());

        let citizen = svc.create(&ctx, req).await.unwrap();
        assert_eq!(citizen.district, "Colombo");
        assert_eq!(citizen.gn_division.as_deref(), Some("COL-05-112"));
        assert_eq!(citizen.status, CaseStatus::Pending);
        assert_eq!(citizen.created_by, ctx.user_id);
    }

    #[tokio::test]
    async fn test_volunteer_cannot_create_elsewhere() {
        let svc = service();
        let mut req = request("199912345678");
        req.district = Some("Galle".into());

        let err = svc
            .create(&testing::volunteer("Colombo"), req)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_admin_must_name_district() {
        let svc = service();
        let err = svc
            .create(&testing::admin(), request("199912345678"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_gn_division_must_match_district() {
        let svc = service();
        let mut req = request("199912345678");
        req.gn_division = Some("GAL-06-009".into());

        let err = svc
            .create(&testing::officer("Colombo"), req)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_other_district_record_is_forbidden() {
        let svc = service();
        let citizen = svc
            .create(&testing::officer("Galle"), request("199912345678"))
            .await
            .unwrap();

        let err = svc
            .get(&testing::officer("Colombo"), citizen.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let listed = svc
            .list(
                &testing::officer("Colombo"),
                CitizenQuery::default(),
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(listed.total_items, 0);
    }

    #[tokio::test]
    async fn test_volunteer_cannot_review() {
        let svc = service();
        let ctx = testing::volunteer("Colombo");
        let citizen = svc.create(&ctx, request("199912345678")).await.unwrap();

        let err = svc
            .approve(&ctx, citizen.id, ReviewRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_review_flow() {
        let svc = service();
        let officer = testing::officer("Colombo");
        let citizen = svc.create(&officer, request("199912345678")).await.unwrap();

        let err = svc
            .reject(&officer, citizen.id, ReviewRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let rejected = svc
            .reject(
                &officer,
                citizen.id,
                ReviewRequest {
                    note: Some("Outside affected area".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(rejected.status, CaseStatus::Rejected);
        assert_eq!(rejected.reviewed_by, Some(officer.user_id));

        let err = svc
            .approve(&officer, citizen.id, ReviewRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_only_admin_deletes_and_record_survives() {
        let svc = service();
        let officer = testing::officer("Colombo");
        let citizen = svc.create(&officer, request("199912345678")).await.unwrap();

        let err = svc.delete(&officer, citizen.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let admin = testing::admin();
        let removed = svc.delete(&admin, citizen.id).await.unwrap();
        assert!(!removed.is_active);

        assert_eq!(
            svc.get(&officer, citizen.id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert!(svc.get(&admin, citizen.id).await.is_ok());
    }
}
