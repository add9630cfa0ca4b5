//! User administration and self-service handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use relief_core::types::pagination::PageResponse;
use relief_entity::user::{UserFilter, UserRole, UserStatus};
use relief_service::user::{
    ApproveUserRequest, ChangePasswordRequest, ChangeRoleRequest, CreateUserRequest,
    ResetPasswordRequest, UpdateUserRequest,
};

use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

type UserJson = Json<ApiResponse<UserResponse>>;

/// `GET /api/users` filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserQuery {
    /// Status filter.
    pub status: Option<UserStatus>,
    /// Role filter.
    pub role: Option<UserRole>,
    /// District filter.
    pub district: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<UserQuery>,
    Query(page): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<UserResponse>>>> {
    let filter = UserFilter {
        status: query.status,
        role: query.role,
        district: query.district,
        search: query.search,
    };
    let users = state
        .admin_user_service
        .list_users(&auth, filter, page.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(users.map(UserResponse::from))))
}

/// GET /api/users/active
pub async fn list_active_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PageResponse<UserResponse>>>> {
    let users = state
        .admin_user_service
        .list_active_users(&auth, page.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(users.map(UserResponse::from))))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, UserJson)> {
    let user = state.admin_user_service.create_user(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<UserJson> {
    let user = state.admin_user_service.get_user(&auth, id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserJson> {
    let user = state.admin_user_service.update_user(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// DELETE /api/users/{id}
pub async fn deactivate_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<UserJson> {
    let user = state.admin_user_service.deactivate_user(&auth, id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /api/users/{id}/activate
pub async fn activate_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<UserJson> {
    let user = state.admin_user_service.activate_user(&auth, id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /api/users/{id}/approve
pub async fn approve_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ApproveUserRequest>,
) -> ApiResult<UserJson> {
    let user = state.admin_user_service.approve_user(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// POST /api/users/{id}/reject
pub async fn reject_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<UserJson> {
    let user = state.admin_user_service.reject_user(&auth, id).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/{id}/role
pub async fn change_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ChangeRoleRequest>,
) -> ApiResult<UserJson> {
    let user = state.admin_user_service.change_role(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/{id}/password
pub async fn reset_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ResetPasswordRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .admin_user_service
        .reset_password(&auth, id, req)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Password reset"))))
}

/// PUT /api/users/me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.user_service.change_password(&auth, req).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Password changed"))))
}
