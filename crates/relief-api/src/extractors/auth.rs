//! Bearer-token authentication for handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use relief_core::error::AppError;
use relief_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// The caller behind `Authorization: Bearer <access token>`.
///
/// Derefs to [`RequestContext`], so handlers pass `&auth` straight to the
/// services. Any failure is a 401; refresh cookies are never accepted here.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.session_manager.authenticate(token)?;
        Ok(AuthUser(RequestContext::from_claims(&claims)))
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let value = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::authentication("Access token required"))?;
    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::authentication("Authorization must be 'Bearer <token>'"))
}
