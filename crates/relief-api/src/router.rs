//! Route definitions for the Relief Desk HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;
    let timeout = Duration::from_secs(server.request_timeout_seconds);
    let body_limit = server.max_body_bytes;
    let cors = build_cors_layer(&server.cors);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(abac_routes())
        .merge(user_routes())
        .merge(citizen_routes())
        .merge(relief_routes())
        .merge(branch_routes())
        .merge(report_routes())
        .merge(lookup_routes())
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

/// Login, refresh, logout, register, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/me", get(handlers::auth::me))
}

/// Policy table inspection
fn abac_routes() -> Router<AppState> {
    Router::new()
        .route("/abac/policies", get(handlers::abac::list_policies))
        .route("/abac/check", post(handlers::abac::check))
        .route("/abac/me", get(handlers::abac::my_permissions))
}

/// User administration and password change
fn user_routes() -> Router<AppState> {
    use handlers::user;

    Router::new()
        .route("/users", get(user::list_users).post(user::create_user))
        .route("/users/active", get(user::list_active_users))
        .route("/users/me/password", put(user::change_password))
        .route(
            "/users/{id}",
            get(user::get_user)
                .put(user::update_user)
                .delete(user::deactivate_user),
        )
        .route("/users/{id}/approve", post(user::approve_user))
        .route("/users/{id}/reject", post(user::reject_user))
        .route("/users/{id}/activate", post(user::activate_user))
        .route("/users/{id}/role", put(user::change_role))
        .route("/users/{id}/password", put(user::reset_password))
}

/// Citizen records
fn citizen_routes() -> Router<AppState> {
    use handlers::citizen;

    Router::new()
        .route(
            "/citizens",
            get(citizen::list_citizens).post(citizen::create_citizen),
        )
        .route(
            "/citizens/{id}",
            get(citizen::get_citizen)
                .put(citizen::update_citizen)
                .delete(citizen::delete_citizen),
        )
        .route("/citizens/{id}/approve", post(citizen::approve_citizen))
        .route("/citizens/{id}/reject", post(citizen::reject_citizen))
}

/// Relief requests
fn relief_routes() -> Router<AppState> {
    use handlers::relief;

    Router::new()
        .route(
            "/relief-requests",
            get(relief::list_requests).post(relief::create_request),
        )
        .route(
            "/relief-requests/{id}",
            get(relief::get_request)
                .put(relief::update_request)
                .delete(relief::delete_request),
        )
        .route("/relief-requests/{id}/approve", post(relief::approve_request))
        .route("/relief-requests/{id}/reject", post(relief::reject_request))
}

/// Branch offices
fn branch_routes() -> Router<AppState> {
    use handlers::branch;

    Router::new()
        .route(
            "/branches",
            get(branch::list_branches).post(branch::create_branch),
        )
        .route(
            "/branches/{id}",
            get(branch::get_branch)
                .put(branch::update_branch)
                .delete(branch::delete_branch),
        )
}

/// Summary and CSV downloads
fn report_routes() -> Router<AppState> {
    use handlers::report;

    Router::new()
        .route("/reports/summary", get(report::summary))
        .route(
            "/reports/relief-requests/export",
            get(report::export_relief_requests),
        )
        .route("/reports/citizens/export", get(report::export_citizens))
}

/// Autofill, GN UID and dashboard
fn lookup_routes() -> Router<AppState> {
    use handlers::lookup;

    Router::new()
        .route("/autofill/citizens/{nic}", get(lookup::autofill_citizen))
        .route("/gnuid", get(lookup::list_gn_divisions))
        .route("/gnuid/{code}", get(lookup::get_gn_division))
        .route("/dashboard", get(lookup::dashboard))
}
