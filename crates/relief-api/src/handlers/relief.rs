//! Relief request handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use relief_core::types::pagination::PageResponse;
use relief_entity::relief::ReliefRequest;
use relief_service::relief::{
    CreateReliefRequestRequest, ReliefRequestQuery, UpdateReliefRequestRequest,
};
use relief_service::review::ReviewRequest;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/relief-requests
pub async fn list_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ReliefRequestQuery>,
    Query(page): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<ReliefRequest>>>> {
    let requests = state
        .relief_service
        .list(&auth, query, page.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// POST /api/relief-requests
pub async fn create_request(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateReliefRequestRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ReliefRequest>>)> {
    let request = state.relief_service.create(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(request))))
}

/// GET /api/relief-requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<ReliefRequest>>> {
    let request = state.relief_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// PUT /api/relief-requests/{id}
pub async fn update_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateReliefRequestRequest>,
) -> ApiResult<Json<ApiResponse<ReliefRequest>>> {
    let request = state.relief_service.update(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// DELETE /api/relief-requests/{id}
pub async fn delete_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<ReliefRequest>>> {
    let request = state.relief_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/relief-requests/{id}/approve
pub async fn approve_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ReviewRequest>,
) -> ApiResult<Json<ApiResponse<ReliefRequest>>> {
    let request = state.relief_service.approve(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/relief-requests/{id}/reject
pub async fn reject_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ReviewRequest>,
) -> ApiResult<Json<ApiResponse<ReliefRequest>>> {
    let request = state.relief_service.reject(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(request)))
}
