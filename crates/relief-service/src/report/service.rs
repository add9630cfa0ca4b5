//! Aggregated report summaries and CSV exports.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use relief_auth::PolicyEvaluator;
use relief_core::error::AppError;
use relief_database::{CitizenStore, ReliefRequestStore};
use relief_entity::access::{Action, Resource};
use relief_entity::citizen::{Citizen, CitizenFilter};
use relief_entity::relief::{ReliefRequest, ReliefRequestFilter};

use super::export;
use crate::context::RequestContext;
use crate::period::day_bounds;

/// Report filter: district plus an inclusive day range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportFilter {
    /// District (admins only; others are pinned to their own).
    pub district: Option<String>,
    /// First day, inclusive.
    pub from: Option<NaiveDate>,
    /// Last day, inclusive.
    pub to: Option<NaiveDate>,
}

/// Record counts broken down by attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountBreakdown {
    /// Total matching records.
    pub total: u64,
    /// Count per case status.
    pub by_status: BTreeMap<String, u64>,
    /// Count per district.
    pub by_district: BTreeMap<String, u64>,
    /// Count per relief category. Empty for citizens.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub by_category: BTreeMap<String, u64>,
}

impl CountBreakdown {
    fn tally(&mut self, status: &str, district: &str, category: Option<&str>) {
        self.total += 1;
        *self.by_status.entry(status.to_string()).or_default() += 1;
        *self.by_district.entry(district.to_string()).or_default() += 1;
        if let Some(category) = category {
            *self.by_category.entry(category.to_string()).or_default() += 1;
        }
    }
}

/// Summary returned by [`ReportService::summary`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// District the report is restricted to, if any.
    pub district: Option<String>,
    /// First day covered.
    pub from: Option<NaiveDate>,
    /// Last day covered.
    pub to: Option<NaiveDate>,
    /// Citizen registrations.
    pub citizens: CountBreakdown,
    /// Relief requests.
    pub relief_requests: CountBreakdown,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
}

/// Produces summaries and CSV downloads for officers and admins.
#[derive(Debug, Clone)]
pub struct ReportService {
    citizens: Arc<dyn CitizenStore>,
    requests: Arc<dyn ReliefRequestStore>,
    policy: Arc<PolicyEvaluator>,
}

struct Scope {
    district: Option<String>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

impl Scope {
    fn covers(&self, at: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| at >= from) && self.to.is_none_or(|to| at < to)
    }
}

impl ReportService {
    /// Creates a new report service.
    pub fn new(
        citizens: Arc<dyn CitizenStore>,
        requests: Arc<dyn ReliefRequestStore>,
        policy: Arc<PolicyEvaluator>,
    ) -> Self {
        Self {
            citizens,
            requests,
            policy,
        }
    }

    fn scope(&self, ctx: &RequestContext, filter: &ReportFilter) -> Result<Scope, AppError> {
        self.policy
            .authorize(&ctx.subject(), Resource::Report, Action::Read)?;
        let (from, to) = day_bounds(filter.from, filter.to)?;
        Ok(Scope {
            district: ctx.scope_filter(filter.district.clone())?,
            from,
            to,
        })
    }

    async fn citizens_in(&self, scope: &Scope) -> Result<Vec<Citizen>, AppError> {
        let filter = CitizenFilter {
            district: scope.district.clone(),
            ..Default::default()
        };
        let mut citizens = self.citizens.list_all(&filter).await?;
        citizens.retain(|c| scope.covers(c.created_at));
        Ok(citizens)
    }

    async fn requests_in(&self, scope: &Scope) -> Result<Vec<ReliefRequest>, AppError> {
        let filter = ReliefRequestFilter {
            district: scope.district.clone(),
            from: scope.from,
            to: scope.to,
            ..Default::default()
        };
        self.requests.list_all(&filter).await
    }

    /// Counts by status, district and category over active records.
    pub async fn summary(
        &self,
        ctx: &RequestContext,
        filter: ReportFilter,
    ) -> Result<ReportSummary, AppError> {
        let scope = self.scope(ctx, &filter)?;

        let mut citizens = CountBreakdown::default();
        for c in self.citizens_in(&scope).await? {
            citizens.tally(c.status.as_str(), &c.district, None);
        }

        let mut relief_requests = CountBreakdown::default();
        for r in self.requests_in(&scope).await? {
            relief_requests.tally(r.status.as_str(), &r.district, Some(r.category.as_str()));
        }

        Ok(ReportSummary {
            district: scope.district,
            from: filter.from,
            to: filter.to,
            citizens,
            relief_requests,
            generated_at: Utc::now(),
        })
    }

    /// Relief requests in scope as CSV, oldest first.
    pub async fn export_relief_requests(
        &self,
        ctx: &RequestContext,
        filter: ReportFilter,
    ) -> Result<Vec<u8>, AppError> {
        let scope = self.scope(ctx, &filter)?;
        let rows = self.requests_in(&scope).await?;
        info!(user_id = %ctx.user_id, rows = rows.len(), "Relief request export");
        export::relief_requests_csv(&rows)
    }

    /// Citizens in scope as CSV, oldest first.
    pub async fn export_citizens(
        &self,
        ctx: &RequestContext,
        filter: ReportFilter,
    ) -> Result<Vec<u8>, AppError> {
        let scope = self.scope(ctx, &filter)?;
        let rows = self.citizens_in(&scope).await?;
        info!(user_id = %ctx.user_id, rows = rows.len(), "Citizen export");
        export::citizens_csv(&rows)
    }
}
