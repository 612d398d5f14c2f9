//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::{AppError, AppResult};
use crate::services::TokenResponse;

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Login email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "budi@example.com")]
    pub email: String,
    /// Account password
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "rahasia123")]
    pub password: String,
}

/// Successful login response
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: TokenResponse,
    pub user: UserResponse,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let session = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    Ok(Json(LoginResponse {
        token: session.token,
        user: UserResponse::from(session.user),
    }))
}
