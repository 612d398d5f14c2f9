//! Problem report handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::access::{authorize_report_patch, authorize_report_view, require_admin, require_field_officer};
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{NewReport, ProblemReport, ReportPatch, ReportStatus, Session};
use crate::errors::AppResult;
use crate::types::{double_option, FieldUpdate};

/// Report submission payload.
///
/// Field presence is checked by the report engine so its errors name the
/// missing field. An assignee in the payload is rejected outright, never
/// silently dropped.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportRequest {
    #[schema(example = "Air keruh")]
    pub title: String,
    #[schema(example = "Air berwarna coklat sejak pagi")]
    pub description: String,
    #[schema(example = "RT 02, Desa Sukamaju")]
    pub location: String,
    pub photo_url: Option<String>,
    pub assignee_id: Option<String>,
}

impl From<SubmitReportRequest> for NewReport {
    fn from(payload: SubmitReportRequest) -> Self {
        NewReport {
            title: payload.title,
            description: payload.description,
            location: payload.location,
            photo_url: payload.photo_url,
            assignee_id: payload.assignee_id,
        }
    }
}

/// Report workflow update.
///
/// `assigneeId` distinguishes absent from null: omitting the key leaves the
/// assignment alone, sending `null` clears it, sending an id reassigns.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportRequest {
    pub status: Option<ReportStatus>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub assignee_id: Option<Option<String>>,
}

impl From<UpdateReportRequest> for ReportPatch {
    fn from(payload: UpdateReportRequest) -> Self {
        ReportPatch {
            status: payload.status,
            assignee: FieldUpdate::from_double_option(payload.assignee_id),
        }
    }
}

/// Create report routes
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reports).post(submit_report))
        .route("/mine", get(list_my_reports))
        .route("/assigned", get(list_assigned_reports))
        .route("/:id", get(get_report).patch(update_report))
}

/// Submit a problem report as the session user
#[utoipa::path(
    post,
    path = "/reports",
    tag = "Reports",
    security(("bearer_auth" = [])),
    request_body = SubmitReportRequest,
    responses(
        (status = 201, description = "Stored report", body = ProblemReport),
        (status = 400, description = "Missing required field"),
        (status = 403, description = "Submission tried to assign an officer")
    )
)]
pub async fn submit_report(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ValidatedJson(payload): ValidatedJson<SubmitReportRequest>,
) -> AppResult<(StatusCode, Json<ProblemReport>)> {
    let report = state
        .report_service
        .submit_report(&session.user_id, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// List all reports with a known reporter
#[utoipa::path(
    get,
    path = "/reports",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Reports, newest first", body = Vec<ProblemReport>),
        (status = 403, description = "Not an administrator")
    )
)]
pub async fn list_reports(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<Vec<ProblemReport>>> {
    require_admin(&session)?;
    let reports = state.report_service.list_all_reports().await?;
    Ok(Json(reports))
}

/// List the caller's own reports
#[utoipa::path(
    get,
    path = "/reports/mine",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's reports, newest first", body = Vec<ProblemReport>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_my_reports(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<Vec<ProblemReport>>> {
    let reports = state
        .report_service
        .list_reports_for_user(&session.user_id)
        .await?;
    Ok(Json(reports))
}

/// List reports assigned to the calling field officer
#[utoipa::path(
    get,
    path = "/reports/assigned",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Assigned reports, newest first", body = Vec<ProblemReport>),
        (status = 403, description = "Not a field officer")
    )
)]
pub async fn list_assigned_reports(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<Vec<ProblemReport>>> {
    require_field_officer(&session)?;
    let reports = state
        .report_service
        .list_reports_assigned_to(&session.user_id)
        .await?;
    Ok(Json(reports))
}

/// Get one report
#[utoipa::path(
    get,
    path = "/reports/{id}",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Report id")),
    responses(
        (status = 200, description = "The report", body = ProblemReport),
        (status = 403, description = "Not the reporter, assignee, or an administrator"),
        (status = 404, description = "Unknown report")
    )
)]
pub async fn get_report(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> AppResult<Json<ProblemReport>> {
    let report = state.report_service.get_report(&id).await?;
    authorize_report_view(&session, &report)?;
    Ok(Json(report))
}

/// Update a report's workflow state or assignment
#[utoipa::path(
    patch,
    path = "/reports/{id}",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Report id")),
    request_body = UpdateReportRequest,
    responses(
        (status = 200, description = "Updated report", body = ProblemReport),
        (status = 400, description = "Invalid assignee or reopened resolved report"),
        (status = 403, description = "Caller may not change this report"),
        (status = 404, description = "Unknown report or assignee")
    )
)]
pub async fn update_report(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateReportRequest>,
) -> AppResult<Json<ProblemReport>> {
    let patch = ReportPatch::from(payload);
    let report = state.report_service.get_report(&id).await?;
    authorize_report_patch(&session, &report, &patch)?;
    let updated = state.report_service.update_report(&id, patch).await?;
    Ok(Json(updated))
}
