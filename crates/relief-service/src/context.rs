//! Request context carrying the authenticated caller's attributes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use relief_auth::{AccessClaims, Subject};
use relief_core::error::AppError;
use relief_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built from the access token claims and passed into every service method,
/// so each operation knows *who* is acting and *where* they may act.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The username from the token.
    pub username: String,
    /// Role at the time the token was issued.
    pub role: UserRole,
    /// District at the time the token was issued.
    pub district: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: Uuid,
        username: impl Into<String>,
        role: UserRole,
        district: Option<String>,
    ) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
            district,
            request_time: Utc::now(),
        }
    }

    /// Build the context from verified access claims.
    pub fn from_claims(claims: &AccessClaims) -> Self {
        Self::new(
            claims.sub,
            claims.username.clone(),
            claims.role,
            claims.district.clone(),
        )
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Attributes for the policy evaluator.
    pub fn subject(&self) -> Subject {
        Subject::new(self.role, self.district.clone())
    }

    /// The district every query must be restricted to, or `None` for admins.
    pub fn district_scope(&self) -> Option<&str> {
        if self.is_admin() {
            None
        } else {
            self.district.as_deref().map(str::trim)
        }
    }

    /// Fail with `Authorization` unless the caller may act in `district`.
    pub fn ensure_district(&self, district: &str) -> Result<(), AppError> {
        match self.district_scope() {
            None => Ok(()),
            Some(own) if own.eq_ignore_ascii_case(district.trim()) => Ok(()),
            Some(_) => Err(AppError::authorization(
                "Record belongs to another district",
            )),
        }
    }

    /// Restrict an optional district filter to the caller's scope.
    ///
    /// Admins keep whatever they asked for; everyone else gets their own
    /// district, and asking for another one is an `Authorization` error.
    pub fn scope_filter(&self, requested: Option<String>) -> Result<Option<String>, AppError> {
        match self.district_scope() {
            None => Ok(requested
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())),
            Some(own) => {
                if let Some(asked) = requested.as_deref().map(str::trim) {
                    if !asked.is_empty() && !asked.eq_ignore_ascii_case(own) {
                        return Err(AppError::authorization(
                            "Cannot query records outside your district",
                        ));
                    }
                }
                Ok(Some(own.to_string()))
            }
        }
    }
}
