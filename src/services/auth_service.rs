//! Authentication service - credential checks and session tokens.
//!
//! Credentials are stored and compared as raw strings; this mirrors the
//! system of record and is a known limitation, not an invitation to add
//! hashing here without also migrating the stored documents.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Session, User, UserRole};
use crate::errors::AppResult;
use crate::infra::Datastore;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Session {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// A successful login: the authenticated user plus their session token
#[derive(Debug)]
pub struct AuthSession {
    pub user: User,
    pub token: TokenResponse,
}

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials against the user directory.
    ///
    /// Returns `Ok(None)` when the email is unknown or the password does
    /// not match; the two cases are deliberately indistinguishable to
    /// the caller. Errors are reserved for storage faults.
    async fn login(&self, email: &str, password: &str) -> AppResult<Option<AuthSession>>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for a user (shared helper to avoid duplication)
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        role: user.role,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Verify JWT token and extract claims (shared helper)
fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService over the datastore
pub struct Authenticator<D: Datastore> {
    ds: Arc<D>,
    config: Config,
}

impl<D: Datastore> Authenticator<D> {
    pub fn new(ds: Arc<D>, config: Config) -> Self {
        Self { ds, config }
    }
}

#[async_trait]
impl<D: Datastore> AuthService for Authenticator<D> {
    async fn login(&self, email: &str, password: &str) -> AppResult<Option<AuthSession>> {
        let Some(user) = self.ds.users().find_by_email(email).await? else {
            tracing::warn!(email, "login attempt for unknown email");
            return Ok(None);
        };

        if user.password != password {
            tracing::warn!(email, "login attempt with wrong password");
            return Ok(None);
        }

        let token = generate_token(&user, &self.config)?;
        tracing::info!(user_id = %user.id, role = %user.role, "login succeeded");
        Ok(Some(AuthSession { user, token }))
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }
}
