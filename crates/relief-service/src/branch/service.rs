//! Branch office administration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use relief_auth::PolicyEvaluator;
use relief_core::error::AppError;
use relief_database::BranchStore;
use relief_entity::access::{Action, Resource};
use relief_entity::branch::{Branch, BranchStatus, CreateBranch, UpdateBranch};

use crate::context::RequestContext;
use crate::review::non_blank;

/// Request to open a branch.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBranchRequest {
    /// Branch name.
    #[validate(length(min = 1, max = 100, message = "Branch name is required"))]
    pub name: String,
    /// District served.
    #[validate(length(min = 1, max = 100, message = "District is required"))]
    pub district: String,
    /// Street address.
    #[validate(length(max = 500))]
    pub address: Option<String>,
    /// Contact phone.
    #[validate(length(max = 30))]
    pub phone: Option<String>,
}

/// Editable branch fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateBranchRequest {
    /// New name.
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// New district.
    #[validate(length(min = 1, max = 100))]
    pub district: Option<String>,
    /// New address.
    #[validate(length(max = 500))]
    pub address: Option<String>,
    /// New phone.
    #[validate(length(max = 30))]
    pub phone: Option<String>,
}

/// Query parameters for listing branches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchQuery {
    /// Only branches in this district.
    pub district: Option<String>,
    /// Include closed branches (admins only).
    #[serde(default)]
    pub include_inactive: bool,
}

/// Branch office operations. Anyone may read; only admins write.
#[derive(Debug, Clone)]
pub struct BranchService {
    branches: Arc<dyn BranchStore>,
    policy: Arc<PolicyEvaluator>,
}

impl BranchService {
    /// Creates a new branch service.
    pub fn new(branches: Arc<dyn BranchStore>, policy: Arc<PolicyEvaluator>) -> Self {
        Self { branches, policy }
    }

    fn authorize(&self, ctx: &RequestContext, action: Action) -> Result<(), AppError> {
        self.policy.authorize(&ctx.subject(), Resource::Branch, action)
    }

    /// List branches ordered by name.
    pub async fn list(&self, ctx: &RequestContext, query: BranchQuery) -> Result<Vec<Branch>, AppError> {
        self.authorize(ctx, Action::Read)?;
        let district = non_blank(query.district.as_deref());
        self.branches
            .list(district.as_deref(), query.include_inactive && ctx.is_admin())
            .await
    }

    /// Get one branch.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Branch, AppError> {
        self.authorize(ctx, Action::Read)?;
        self.branches
            .find_by_id(id)
            .await?
            .filter(|b| b.status == BranchStatus::Active || ctx.is_admin())
            .ok_or_else(|| AppError::not_found("Branch not found"))
    }

    /// Open a branch.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateBranchRequest,
    ) -> Result<Branch, AppError> {
        self.authorize(ctx, Action::Create)?;

        let name = non_blank(Some(req.name.as_str()))
            .ok_or_else(|| AppError::validation("Branch name is required"))?;
        let district = non_blank(Some(req.district.as_str()))
            .ok_or_else(|| AppError::validation("District is required"))?;

        let branch = self
            .branches
            .create(&CreateBranch {
                name,
                district,
                address: non_blank(req.address.as_deref()),
                phone: non_blank(req.phone.as_deref()),
            })
            .await?;

        info!(user_id = %ctx.user_id, branch_id = %branch.id, name = %branch.name, "Branch opened");
        Ok(branch)
    }

    /// Update a branch.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateBranchRequest,
    ) -> Result<Branch, AppError> {
        self.authorize(ctx, Action::Update)?;

        let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
        if blank(&req.name) || blank(&req.district) {
            return Err(AppError::validation("Name and district cannot be blank"));
        }

        let update = UpdateBranch {
            name: non_blank(req.name.as_deref()),
            district: non_blank(req.district.as_deref()),
            address: req.address.map(|a| a.trim().to_string()),
            phone: req.phone.map(|p| p.trim().to_string()),
        };
        self.branches
            .update(id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("Branch not found"))
    }

    /// Close a branch.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<Branch, AppError> {
        self.authorize(ctx, Action::Delete)?;

        let branch = self
            .branches
            .set_status(id, BranchStatus::Inactive)
            .await?
            .ok_or_else(|| AppError::not_found("Branch not found"))?;

        info!(user_id = %ctx.user_id, branch_id = %id, "Branch closed");
        Ok(branch)
    }
}

#[cfg(test)]
mod tests {
    use relief_core::error::ErrorKind;

    use super::*;
    use crate::testing;

    fn service() -> BranchService {
        let d = testing::deps();
        BranchService::new(d.stores.branches, d.policy)
    }

    fn branch(name: &str, district: &str) -> CreateBranchRequest {
        CreateBranchRequest {
            name: name.into(),
            district: district.into(),
            address: None,
            phone: Some(" 0112 345 678 ".into()),
        }
    }

    #[tokio::test]
    async fn test_only_admin_writes() {
        let svc = service();
        let err = svc
            .create(&testing::officer("Colombo"), branch("Fort", "Colombo"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let created = svc
            .create(&testing::admin(), branch("Fort", "Colombo"))
            .await
            .unwrap();
        assert_eq!(created.phone.as_deref(), Some("0112 345 678"));

        let seen = svc
            .list(&testing::volunteer("Galle"), BranchQuery::default())
            .await
            .unwrap();
        assert_eq!(seen.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let svc = service();
        let admin = testing::admin();
        svc.create(&admin, branch("Fort", "Colombo")).await.unwrap();
        let err = svc.create(&admin, branch("fort", "Galle")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_closed_branch_hidden_from_staff() {
        let svc = service();
        let admin = testing::admin();
        let b = svc.create(&admin, branch("Fort", "Colombo")).await.unwrap();

        let closed = svc.delete(&admin, b.id).await.unwrap();
        assert_eq!(closed.status, BranchStatus::Inactive);

        let officer = testing::officer("Colombo");
        assert_eq!(
            svc.get(&officer, b.id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        let listed = svc
            .list(
                &officer,
                BranchQuery {
                    district: None,
                    include_inactive: true,
                },
            )
            .await
            .unwrap();
        assert!(listed.is_empty());

        let all = svc
            .list(
                &admin,
                BranchQuery {
                    district: Some("Colombo".into()),
                    include_inactive: true,
                },
            )
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }
}
