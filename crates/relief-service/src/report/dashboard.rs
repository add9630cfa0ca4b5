//! Landing dashboard counters.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use relief_auth::PolicyEvaluator;
use relief_core::error::AppError;
use relief_database::{BranchStore, CitizenStore, ReliefRequestStore};
use relief_entity::access::{Action, Resource};
use relief_entity::case::CaseStatus;
use relief_entity::citizen::CitizenFilter;
use relief_entity::relief::ReliefRequestFilter;

use crate::context::RequestContext;

/// Headline numbers for the caller's district (or everything, for admins).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardOverview {
    /// District the numbers cover, `None` meaning all.
    pub district: Option<String>,
    /// Active citizen records.
    pub citizens: u64,
    /// Citizens awaiting review.
    pub citizens_pending: u64,
    /// Active relief requests.
    pub relief_requests: u64,
    /// Relief requests awaiting review.
    pub requests_pending: u64,
    /// Approved relief requests.
    pub requests_approved: u64,
    /// Open branch offices.
    pub branches: u64,
}

/// Builds the dashboard overview.
#[derive(Debug, Clone)]
pub struct DashboardService {
    citizens: Arc<dyn CitizenStore>,
    requests: Arc<dyn ReliefRequestStore>,
    branches: Arc<dyn BranchStore>,
    policy: Arc<PolicyEvaluator>,
}

impl DashboardService {
    /// Creates a new dashboard service.
    pub fn new(
        citizens: Arc<dyn CitizenStore>,
        requests: Arc<dyn ReliefRequestStore>,
        branches: Arc<dyn BranchStore>,
        policy: Arc<PolicyEvaluator>,
    ) -> Self {
        Self {
            citizens,
            requests,
            branches,
            policy,
        }
    }

    /// Counters scoped to the caller.
    pub async fn overview(&self, ctx: &RequestContext) -> Result<DashboardOverview, AppError> {
        self.policy
            .authorize(&ctx.subject(), Resource::Dashboard, Action::Read)?;
        let district = ctx.scope_filter(None)?;

        let citizens = self
            .citizens
            .list_all(&CitizenFilter {
                district: district.clone(),
                ..Default::default()
            })
            .await?;
        let requests = self
            .requests
            .list_all(&ReliefRequestFilter {
                district: district.clone(),
                ..Default::default()
            })
            .await?;
        let branches = self.branches.list(district.as_deref(), false).await?;

        let count = |n: usize| n as u64;
        Ok(DashboardOverview {
            citizens: count(citizens.len()),
            citizens_pending: count(
                citizens
                    .iter()
                    .filter(|c| c.status == CaseStatus::Pending)
                    .count(),
            ),
            relief_requests: count(requests.len()),
            requests_pending: count(
                requests
                    .iter()
                    .filter(|r| r.status == CaseStatus::Pending)
                    .count(),
            ),
            requests_approved: count(
                requests
                    .iter()
                    .filter(|r| r.status == CaseStatus::Approved)
                    .count(),
            ),
            branches: count(branches.len()),
            district,
        })
    }
}
