//! Admin dashboard handler.

use axum::{extract::State, response::Json, routing::get, Extension, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::access::require_admin;
use crate::api::AppState;
use crate::domain::{ReportStatus, Session};
use crate::errors::AppResult;
use crate::services::parallel;

/// Dashboard numbers for the admin landing page
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    /// Registered accounts of every role
    pub total_users: usize,
    /// Reports not yet resolved
    pub active_reports: usize,
    /// Configured tariffs
    pub tariffs: usize,
    pub reports_by_status: ReportsByStatus,
}

/// Report totals per workflow state
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportsByStatus {
    pub baru: usize,
    pub diproses: usize,
    pub selesai: usize,
}

/// Create admin routes
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/overview", get(overview))
}

/// Aggregate counts for the admin dashboard
#[utoipa::path(
    get,
    path = "/admin/overview",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard counts", body = OverviewResponse),
        (status = 403, description = "Not an administrator")
    )
)]
pub async fn overview(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<OverviewResponse>> {
    require_admin(&session)?;

    let (users, reports, tariffs) = parallel::join3(
        state.user_service.list_users(),
        state.report_service.list_all_reports(),
        state.billing_service.list_tariffs(),
    )
    .await?;

    let count = |status: ReportStatus| reports.iter().filter(|r| r.status == status).count();
    let by_status = ReportsByStatus {
        baru: count(ReportStatus::Baru),
        diproses: count(ReportStatus::Diproses),
        selesai: count(ReportStatus::Selesai),
    };

    Ok(Json(OverviewResponse {
        total_users: users.len(),
        active_reports: by_status.baru + by_status.diproses,
        tariffs: tariffs.len(),
        reports_by_status: by_status,
    }))
}
