//! Policy inspection handlers.

use axum::Json;
use axum::extract::State;

use relief_auth::abac::{Decision, PolicyView};
use relief_service::access::{CheckRequest, Permission};

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/abac/policies
pub async fn list_policies(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<PolicyView>>>> {
    let policies = state.access_service.list_policies(&auth)?;
    Ok(Json(ApiResponse::ok(policies)))
}

/// POST /api/abac/check
pub async fn check(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CheckRequest>,
) -> ApiResult<Json<ApiResponse<Decision>>> {
    let decision = state.access_service.check(&auth, req)?;
    Ok(Json(ApiResponse::ok(decision)))
}

/// GET /api/abac/me
pub async fn my_permissions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<ApiResponse<Vec<Permission>>> {
    Json(ApiResponse::ok(state.access_service.my_permissions(&auth)))
}
