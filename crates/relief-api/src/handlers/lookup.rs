//! Autofill, GN division and dashboard handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use relief_entity::geo::GnDivision;
use relief_service::lookup::CitizenAutofill;
use relief_service::report::DashboardOverview;

use crate::dto::request::DistrictQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/autofill/citizens/{nic}
pub async fn autofill_citizen(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(nic): Path<String>,
) -> ApiResult<Json<ApiResponse<CitizenAutofill>>> {
    let hit = state.autofill_service.by_nic(&auth, &nic).await?;
    Ok(Json(ApiResponse::ok(hit)))
}

/// GET /api/gnuid?district=
pub async fn list_gn_divisions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DistrictQuery>,
) -> ApiResult<Json<ApiResponse<Vec<GnDivision>>>> {
    let divisions = state
        .gn_division_service
        .list(&auth, &query.district)
        .await?;
    Ok(Json(ApiResponse::ok(divisions)))
}

/// GET /api/gnuid/{code}
pub async fn get_gn_division(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(code): Path<String>,
) -> ApiResult<Json<ApiResponse<GnDivision>>> {
    let division = state.gn_division_service.get(&auth, &code).await?;
    Ok(Json(ApiResponse::ok(division)))
}

/// GET /api/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<DashboardOverview>>> {
    let overview = state.dashboard_service.overview(&auth).await?;
    Ok(Json(ApiResponse::ok(overview)))
}
