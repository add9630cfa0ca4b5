//! Citizen record handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use relief_core::types::pagination::PageResponse;
use relief_entity::citizen::Citizen;
use relief_service::citizen::{CitizenQuery, CreateCitizenRequest, UpdateCitizenRequest};
use relief_service::review::ReviewRequest;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/citizens
pub async fn list_citizens(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CitizenQuery>,
    Query(page): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<Citizen>>>> {
    let citizens = state
        .citizen_service
        .list(&auth, query, page.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(citizens)))
}

/// POST /api/citizens
pub async fn create_citizen(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateCitizenRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Citizen>>)> {
    let citizen = state.citizen_service.create(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(citizen))))
}

/// GET /api/citizens/{id}
pub async fn get_citizen(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Citizen>>> {
    let citizen = state.citizen_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(citizen)))
}

/// PUT /api/citizens/{id}
pub async fn update_citizen(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateCitizenRequest>,
) -> ApiResult<Json<ApiResponse<Citizen>>> {
    let citizen = state.citizen_service.update(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(citizen)))
}

/// DELETE /api/citizens/{id}
pub async fn delete_citizen(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Citizen>>> {
    let citizen = state.citizen_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(citizen)))
}

/// POST /api/citizens/{id}/approve
pub async fn approve_citizen(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ReviewRequest>,
) -> ApiResult<Json<ApiResponse<Citizen>>> {
    let citizen = state.citizen_service.approve(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(citizen)))
}

/// POST /api/citizens/{id}/reject
pub async fn reject_citizen(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ReviewRequest>,
) -> ApiResult<Json<ApiResponse<Citizen>>> {
    let citizen = state.citizen_service.reject(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(citizen)))
}
