//! Branch office handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use relief_entity::branch::Branch;
use relief_service::branch::{BranchQuery, CreateBranchRequest, UpdateBranchRequest};

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/branches
pub async fn list_branches(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<BranchQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Branch>>>> {
    let branches = state.branch_service.list(&auth, query).await?;
    Ok(Json(ApiResponse::ok(branches)))
}

/// POST /api/branches
pub async fn create_branch(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateBranchRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Branch>>)> {
    let branch = state.branch_service.create(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(branch))))
}

/// GET /api/branches/{id}
pub async fn get_branch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Branch>>> {
    let branch = state.branch_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(branch)))
}

/// PUT /api/branches/{id}
pub async fn update_branch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateBranchRequest>,
) -> ApiResult<Json<ApiResponse<Branch>>> {
    let branch = state.branch_service.update(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(branch)))
}

/// DELETE /api/branches/{id}
pub async fn delete_branch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Branch>>> {
    let branch = state.branch_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(branch)))
}
