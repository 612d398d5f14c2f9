//! Billing handlers: meter readings, bill settlement, tariff administration.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::access::require_admin;
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Bill, BillStatus, Session, Tariff, TariffChanges};
use crate::errors::AppResult;

/// Meter reading submission (admin only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordReadingRequest {
    /// Customer the reading belongs to
    #[validate(length(min = 1, message = "User id is required"))]
    pub user_id: String,
    /// Cumulative meter value in cubic meters
    #[schema(example = 120)]
    pub reading: u32,
}

/// Bill listing filter
#[derive(Debug, Deserialize, IntoParams)]
pub struct BillQuery {
    /// Restrict the listing to one payment status
    pub status: Option<BillStatus>,
}

/// Tariff update request (admin only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTariffRequest {
    pub name: Option<String>,
    pub rate_per_m3: Option<i64>,
    pub admin_fee: Option<i64>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl From<UpdateTariffRequest> for TariffChanges {
    fn from(payload: UpdateTariffRequest) -> Self {
        TariffChanges {
            name: payload.name,
            rate_per_m3: payload.rate_per_m3,
            admin_fee: payload.admin_fee,
            description: payload.description,
            active: payload.active,
        }
    }
}

/// Create bill routes
pub fn bill_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bills))
        .route("/mine", get(list_my_bills))
        .route("/:id/settle", post(settle_bill))
}

/// Create meter reading routes
pub fn billing_routes() -> Router<AppState> {
    Router::new().route("/readings", post(record_reading))
}

/// Create tariff routes
pub fn tariff_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tariffs))
        .route("/:id", patch(update_tariff))
}

/// List bills across all customers
#[utoipa::path(
    get,
    path = "/bills",
    tag = "Bills",
    security(("bearer_auth" = [])),
    params(BillQuery),
    responses(
        (status = 200, description = "Bills, newest due date first", body = Vec<Bill>),
        (status = 403, description = "Not an administrator")
    )
)]
pub async fn list_bills(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<BillQuery>,
) -> AppResult<Json<Vec<Bill>>> {
    require_admin(&session)?;
    let bills = match query.status {
        Some(BillStatus::Unpaid) => state.billing_service.list_unpaid_bills().await?,
        Some(BillStatus::Paid) => {
            let mut bills = state.billing_service.list_all_bills().await?;
            bills.retain(Bill::is_paid);
            bills
        }
        None => state.billing_service.list_all_bills().await?,
    };
    Ok(Json(bills))
}

/// List the caller's own billing history
#[utoipa::path(
    get,
    path = "/bills/mine",
    tag = "Bills",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's bills, newest due date first", body = Vec<Bill>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_my_bills(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<Vec<Bill>>> {
    let bills = state
        .billing_service
        .list_bills_for_user(&session.user_id)
        .await?;
    Ok(Json(bills))
}

/// Record a meter reading and generate the monthly bill
#[utoipa::path(
    post,
    path = "/billing/readings",
    tag = "Bills",
    security(("bearer_auth" = [])),
    request_body = RecordReadingRequest,
    responses(
        (status = 201, description = "Generated bill", body = Bill),
        (status = 400, description = "Reading not above the previous one"),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "Unknown customer or no active tariff")
    )
)]
pub async fn record_reading(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ValidatedJson(payload): ValidatedJson<RecordReadingRequest>,
) -> AppResult<(StatusCode, Json<Bill>)> {
    require_admin(&session)?;
    let bill = state
        .billing_service
        .record_meter_reading(&payload.user_id, payload.reading)
        .await?;
    Ok((StatusCode::CREATED, Json(bill)))
}

/// Settle a bill
#[utoipa::path(
    post,
    path = "/bills/{id}/settle",
    tag = "Bills",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Bill id")),
    responses(
        (status = 200, description = "The settled bill", body = Bill),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "Unknown bill"),
        (status = 409, description = "Bill already settled")
    )
)]
pub async fn settle_bill(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> AppResult<Json<Bill>> {
    require_admin(&session)?;
    let bill = state.billing_service.settle_bill(&id).await?;
    Ok(Json(bill))
}

/// List the rate schedule
#[utoipa::path(
    get,
    path = "/tariffs",
    tag = "Tariffs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All tariffs", body = Vec<Tariff>),
        (status = 403, description = "Not an administrator")
    )
)]
pub async fn list_tariffs(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<Vec<Tariff>>> {
    require_admin(&session)?;
    let tariffs = state.billing_service.list_tariffs().await?;
    Ok(Json(tariffs))
}

/// Update a tariff
#[utoipa::path(
    patch,
    path = "/tariffs/{id}",
    tag = "Tariffs",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Tariff id")),
    request_body = UpdateTariffRequest,
    responses(
        (status = 200, description = "Updated tariff", body = Tariff),
        (status = 400, description = "No fields to update"),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "Unknown tariff")
    )
)]
pub async fn update_tariff(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateTariffRequest>,
) -> AppResult<Json<Tariff>> {
    require_admin(&session)?;
    let tariff = state
        .billing_service
        .update_tariff(&id, payload.into())
        .await?;
    Ok(Json(tariff))
}
