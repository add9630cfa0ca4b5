//! Auth handlers: login, refresh, logout, register, me.
//!
//! The refresh token never appears in a response body; it travels only in
//! the HTTP-only `jwt` cookie scoped to `/api/auth`.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::info;

use relief_auth::session::LoginResult;
use relief_core::config::AuthConfig;
use relief_service::user::RegisterRequest;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// Path the refresh cookie is scoped to.
pub const REFRESH_COOKIE_PATH: &str = "/api/auth";

fn refresh_cookie(config: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.refresh_cookie_name.clone(), token))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .path(REFRESH_COOKIE_PATH)
        .max_age(time::Duration::seconds(config.refresh_ttl_seconds()))
        .build()
}

fn expired_cookie(config: &AuthConfig) -> Cookie<'static> {
    Cookie::build((config.refresh_cookie_name.clone(), ""))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .path(REFRESH_COOKIE_PATH)
        .max_age(time::Duration::ZERO)
        .build()
}

fn session_response(
    state: &AppState,
    jar: CookieJar,
    result: LoginResult,
) -> (CookieJar, Json<ApiResponse<LoginResponse>>) {
    let jar = jar.add(refresh_cookie(&state.config.auth, result.tokens.refresh_token));
    let body = LoginResponse {
        access_token: result.tokens.access_token,
        access_expires_at: result.tokens.access_expires_at,
        user: UserResponse::from(result.user),
    };
    (jar, Json(ApiResponse::ok(body)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<ApiResponse<LoginResponse>>)> {
    let result = state
        .session_manager
        .login(&req.username, &req.password)
        .await?;
    Ok(session_response(&state, jar, result))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<ApiResponse<LoginResponse>>)> {
    let token = jar
        .get(&state.config.auth.refresh_cookie_name)
        .map(|c| c.value().to_string());

    let result = state.session_manager.refresh(token.as_deref()).await?;
    Ok(session_response(&state, jar, result))
}

/// POST /api/auth/logout
///
/// Stateless: clears the cookie and nothing else.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    info!("Refresh cookie cleared");
    (
        jar.add(expired_cookie(&state.config.auth)),
        Json(ApiResponse::ok(MessageResponse::new("Logged out"))),
    )
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let user = state.user_service.register(req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.me(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
