//! Read-only views over the policy table.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use validator::Validate;

use relief_auth::PolicyEvaluator;
use relief_auth::abac::{Decision, PolicyView, Subject};
use relief_core::error::AppError;
use relief_entity::access::{Action, Resource};
use relief_entity::user::UserRole;

use crate::context::RequestContext;

/// Hypothetical subject and request to evaluate.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckRequest {
    /// Subject role.
    pub role: UserRole,
    /// Subject district.
    #[validate(length(max = 100, message = "District must be at most 100 characters"))]
    pub district: Option<String>,
    /// Resource tag, e.g. `page:citizen`.
    pub resource: Resource,
    /// Action.
    pub action: Action,
}

/// One (resource, action) pair the caller is allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Resource tag.
    pub resource: Resource,
    /// Action.
    pub action: Action,
}

/// Lists the policy table and answers "may X do Y" questions.
#[derive(Debug, Clone)]
pub struct AccessService {
    policy: Arc<PolicyEvaluator>,
}

impl AccessService {
    /// Creates a new access service.
    pub fn new(policy: Arc<PolicyEvaluator>) -> Self {
        Self { policy }
    }

    /// Every policy row. Admin only.
    pub fn list_policies(&self, ctx: &RequestContext) -> Result<Vec<PolicyView>, AppError> {
        self.policy
            .authorize(&ctx.subject(), Resource::Abac, Action::Read)?;
        Ok(self.policy.policies())
    }

    /// Evaluate an arbitrary subject. Admin only.
    pub fn check(&self, ctx: &RequestContext, req: CheckRequest) -> Result<Decision, AppError> {
        self.policy
            .authorize(&ctx.subject(), Resource::Abac, Action::Read)?;
        let subject = Subject::new(req.role, req.district);
        Ok(self.policy.explain(&subject, req.resource, req.action))
    }

    /// Pairs the caller is allowed, in resource then action order.
    ///
    /// Needs no policy of its own: it only reveals the caller's own rights.
    pub fn my_permissions(&self, ctx: &RequestContext) -> Vec<Permission> {
        let subject = ctx.subject();
        Resource::ALL
            .into_iter()
            .flat_map(|resource| Action::ALL.into_iter().map(move |action| (resource, action)))
            .filter(|&(resource, action)| self.policy.evaluate(&subject, resource, action))
            .map(|(resource, action)| Permission { resource, action })
            .collect()
    }
}
