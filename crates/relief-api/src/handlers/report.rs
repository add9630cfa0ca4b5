//! Report summary and CSV download handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use relief_service::report::{ReportFilter, ReportSummary};

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

fn csv_download(stem: &str, bytes: Vec<u8>) -> Response {
    let filename = format!("{stem}-{}.csv", Utc::now().format("%Y%m%d"));
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// GET /api/reports/summary
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<ReportFilter>,
) -> ApiResult<Json<ApiResponse<ReportSummary>>> {
    let summary = state.report_service.summary(&auth, filter).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/reports/relief-requests/export
pub async fn export_relief_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<ReportFilter>,
) -> ApiResult<Response> {
    let bytes = state
        .report_service
        .export_relief_requests(&auth, filter)
        .await?;
    Ok(csv_download("relief-requests", bytes))
}

/// GET /api/reports/citizens/export
pub async fn export_citizens(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<ReportFilter>,
) -> ApiResult<Response> {
    let bytes = state.report_service.export_citizens(&auth, filter).await?;
    Ok(csv_download("citizens", bytes))
}
