//! User directory and profile handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::access::{require_admin, require_self_or_admin};
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{ConnectionStatus, NewUser, Session, UserChanges, UserResponse, UserRole};
use crate::errors::AppResult;

/// Account creation request (admin only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Budi Santoso")]
    pub name: String,
    /// Login email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "budi@example.com")]
    pub email: String,
    /// Contact phone number
    #[validate(length(min = 1, message = "Phone number is required"))]
    #[schema(example = "081234567890")]
    pub phone_number: String,
    /// Account password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "rahasia123", min_length = 8)]
    pub password: String,
    /// Service address
    #[validate(length(min = 1, message = "Address is required"))]
    #[schema(example = "Jalan Melati No. 5, Desa Sukamaju")]
    pub address: String,
    /// Account role
    pub role: UserRole,
}

impl From<CreateUserRequest> for NewUser {
    fn from(payload: CreateUserRequest) -> Self {
        NewUser {
            name: payload.name,
            email: payload.email,
            phone_number: payload.phone_number,
            password: payload.password,
            address: payload.address,
            role: payload.role,
        }
    }
}

/// Directory update request (admin only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub connection_status: Option<ConnectionStatus>,
}

/// Profile update request (the caller's own account)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Credential reset request (admin only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    /// New password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "rahasia-baru", min_length = 8)]
    pub password: String,
}

/// Create user directory routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).patch(update_user))
        .route("/:id/password", put(reset_password))
}

/// Create self-service profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/", get(get_profile).patch(update_profile))
}

/// List every user account
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All user accounts", body = Vec<UserResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not an administrator")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<Vec<UserResponse>>> {
    require_admin(&session)?;
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create a user account
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Not an administrator"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    require_admin(&session)?;
    let user = state.user_service.add_user(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Get one user account
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "The account", body = UserResponse),
        (status = 403, description = "Not the account owner or an administrator"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    require_self_or_admin(&session, &id)?;
    let user = state.user_service.get_user(&id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update a user account (directory fields)
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated account", body = UserResponse),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    require_admin(&session)?;
    let changes = UserChanges {
        name: payload.name,
        email: payload.email,
        phone_number: payload.phone_number,
        address: payload.address,
        connection_status: payload.connection_status,
    };
    let user = state.user_service.update_user(&id, changes).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Reset an account credential
#[utoipa::path(
    put,
    path = "/users/{id}/password",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User id")),
    request_body = ResetPasswordRequest,
    responses(
        (status = 204, description = "Password replaced"),
        (status = 403, description = "Not an administrator"),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    require_admin(&session)?;
    state
        .user_service
        .reset_password(&id, &payload.password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the caller's own profile
#[utoipa::path(
    get,
    path = "/profile",
    tag = "Profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's account", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(&session.user_id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update the caller's own profile
#[utoipa::path(
    patch,
    path = "/profile",
    tag = "Profile",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated account", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    // Connection status is a directory field; customers cannot flip their own
    let changes = UserChanges {
        name: payload.name,
        email: payload.email,
        phone_number: payload.phone_number,
        address: payload.address,
        connection_status: None,
    };
    let user = state
        .user_service
        .update_user(&session.user_id, changes)
        .await?;
    Ok(Json(UserResponse::from(user)))
}
