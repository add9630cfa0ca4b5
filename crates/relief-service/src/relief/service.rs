//! Relief request filing and review.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use relief_auth::PolicyEvaluator;
use relief_core::error::AppError;
use relief_core::types::pagination::{PageRequest, PageResponse};
use relief_database::{CitizenStore, ReliefRequestStore};
use relief_entity::access::{Action, Resource};
use relief_entity::case::CaseStatus;
use relief_entity::relief::{
    CreateReliefRequest, ReliefCategory, ReliefRequest, ReliefRequestFilter, UpdateReliefRequest,
};

use crate::context::RequestContext;
use crate::period::day_bounds;
use crate::review::{ReviewRequest, ensure_transition, non_blank};

/// Request to file relief for a citizen.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReliefRequestRequest {
    /// Target citizen.
    pub citizen_id: Uuid,
    /// Kind of assistance.
    pub category: ReliefCategory,
    /// What is needed.
    #[validate(length(min = 1, max = 2000, message = "Description is required"))]
    pub description: String,
}

/// Editable relief request fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateReliefRequestRequest {
    /// New category.
    pub category: Option<ReliefCategory>,
    /// New description.
    #[validate(length(min = 1, max = 2000))]
    pub description: Option<String>,
}

/// Query parameters for listing relief requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReliefRequestQuery {
    /// District filter (admins only; others are pinned to their own).
    pub district: Option<String>,
    /// Status filter.
    pub status: Option<CaseStatus>,
    /// Category filter.
    pub category: Option<ReliefCategory>,
    /// Only requests for this citizen.
    pub citizen_id: Option<Uuid>,
    /// First day, inclusive.
    pub from: Option<NaiveDate>,
    /// Last day, inclusive.
    pub to: Option<NaiveDate>,
    /// Include soft-deleted requests (admins only).
    #[serde(default)]
    pub include_inactive: bool,
}

/// Relief request operations, scoped to the caller's district.
#[derive(Debug, Clone)]
pub struct ReliefRequestService {
    requests: Arc<dyn ReliefRequestStore>,
    citizens: Arc<dyn CitizenStore>,
    policy: Arc<PolicyEvaluator>,
}

impl ReliefRequestService {
    /// Creates a new relief request service.
    pub fn new(
        requests: Arc<dyn ReliefRequestStore>,
        citizens: Arc<dyn CitizenStore>,
        policy: Arc<PolicyEvaluator>,
    ) -> Self {
        Self {
            requests,
            citizens,
            policy,
        }
    }

    fn authorize(&self, ctx: &RequestContext, action: Action) -> Result<(), AppError> {
        self.policy
            .authorize(&ctx.subject(), Resource::ReliefRequest, action)
    }

    async fn load(&self, ctx: &RequestContext, id: Uuid) -> Result<ReliefRequest, AppError> {
        let request = self
            .requests
            .find_by_id(id)
            .await?
            .filter(|r| r.is_active || ctx.is_admin())
            .ok_or_else(|| AppError::not_found("Relief request not found"))?;
        ctx.ensure_district(&request.district)?;
        Ok(request)
    }

    /// List relief requests visible to the caller, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: ReliefRequestQuery,
        page: PageRequest,
    ) -> Result<PageResponse<ReliefRequest>, AppError> {
        self.authorize(ctx, Action::Read)?;

        let (from, to) = day_bounds(query.from, query.to)?;
        let filter = ReliefRequestFilter {
            district: ctx.scope_filter(query.district)?,
            status: query.status,
            category: query.category,
            citizen_id: query.citizen_id,
            from,
            to,
            include_inactive: query.include_inactive && ctx.is_admin(),
        };
        self.requests.list(&filter, &page).await
    }

    /// Get one relief request.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<ReliefRequest, AppError> {
        self.authorize(ctx, Action::Read)?;
        self.load(ctx, id).await
    }

    /// File a request for an active citizen. The district is the citizen's.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateReliefRequestRequest,
    ) -> Result<ReliefRequest, AppError> {
        self.authorize(ctx, Action::Create)?;

        let description = non_blank(Some(req.description.as_str()))
            .ok_or_else(|| AppError::validation("Description is required"))?;

        let citizen = self
            .citizens
            .find_by_id(req.citizen_id)
            .await?
            .filter(|c| c.is_active)
            .ok_or_else(|| AppError::validation("Citizen does not exist or has been deleted"))?;
        ctx.ensure_district(&citizen.district)?;

        let request = self
            .requests
            .create(&CreateReliefRequest {
                citizen_id: citizen.id,
                category: req.category,
                description,
                district: citizen.district,
                created_by: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            request_id = %request.id,
            citizen_id = %request.citizen_id,
            category = request.category.as_str(),
            "Relief request filed"
        );
        Ok(request)
    }

    /// Update editable fields.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateReliefRequestRequest,
    ) -> Result<ReliefRequest, AppError> {
        self.authorize(ctx, Action::Update)?;
        self.load(ctx, id).await?;

        if req
            .description
            .as_deref()
            .is_some_and(|d| d.trim().is_empty())
        {
            return Err(AppError::validation("Description cannot be blank"));
        }

        let update = UpdateReliefRequest {
            category: req.category,
            description: non_blank(req.description.as_deref()),
        };
        self.requests
            .update(id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("Relief request not found"))
    }

    /// Approve a pending request.
    pub async fn approve(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: ReviewRequest,
    ) -> Result<ReliefRequest, AppError> {
        self.review(ctx, id, CaseStatus::Approved, req).await
    }

    /// Reject a pending request. A note is required.
    pub async fn reject(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: ReviewRequest,
    ) -> Result<ReliefRequest, AppError> {
        self.review(ctx, id, CaseStatus::Rejected, req).await
    }

    async fn review(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        to: CaseStatus,
        req: ReviewRequest,
    ) -> Result<ReliefRequest, AppError> {
        self.authorize(ctx, Action::Update)?;
        let note = req.note_for(to)?;

        let current = self.load(ctx, id).await?;
        if !current.is_active {
            return Err(AppError::conflict("Relief request has been deleted"));
        }
        ensure_transition(current.status, to)?;

        let reviewed = self
            .requests
            .transition(id, current.status, to, note.as_deref(), ctx.user_id)
            .await?
            .ok_or_else(|| AppError::conflict("Relief request was reviewed concurrently"))?;

        info!(
            reviewer_id = %ctx.user_id,
            request_id = %id,
            status = to.as_str(),
            "Relief request reviewed"
        );
        Ok(reviewed)
    }

    /// Soft-delete a request.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<ReliefRequest, AppError> {
        self.authorize(ctx, Action::Delete)?;

        let removed = self
            .requests
            .deactivate(id)
            .await?
            .ok_or_else(|| AppError::not_found("Relief request not found"))?;

        info!(user_id = %ctx.user_id, request_id = %id, "Relief request deactivated");
        Ok(removed)
    }
}
