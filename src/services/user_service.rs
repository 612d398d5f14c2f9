//! User service - account directory operations.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::config::{AVATAR_URL_BASE, CUSTOMER_NUMBER_PREFIX};
use crate::domain::{ConnectionStatus, NewUser, User, UserChanges};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Datastore;

/// User service trait for dependency injection
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by id
    async fn get_user(&self, id: &str) -> AppResult<User>;

    /// List all user accounts
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Create an account with a generated customer number and avatar
    async fn add_user(&self, data: NewUser) -> AppResult<User>;

    /// Update profile fields
    async fn update_user(&self, id: &str, changes: UserChanges) -> AppResult<User>;

    /// Overwrite the account credential
    async fn reset_password(&self, id: &str, new_password: &str) -> AppResult<()>;
}

/// Concrete implementation of UserService over the datastore
pub struct UserDirectory<D: Datastore> {
    ds: Arc<D>,
}

impl<D: Datastore> UserDirectory<D> {
    pub fn new(ds: Arc<D>) -> Self {
        Self { ds }
    }
}

/// Customer number from the last six digits of the current epoch millis
fn generate_customer_number() -> String {
    format!(
        "{}{:06}",
        CUSTOMER_NUMBER_PREFIX,
        Utc::now().timestamp_millis() % 1_000_000
    )
}

#[async_trait]
impl<D: Datastore> UserService for UserDirectory<D> {
    async fn get_user(&self, id: &str) -> AppResult<User> {
        self.ds.users().find_by_id(id).await?.ok_or_not_found("user")
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.ds.users().list().await
    }

    async fn add_user(&self, data: NewUser) -> AppResult<User> {
        // Field formats are validated by the handler's ValidatedJson extractor
        if self.ds.users().find_by_email(&data.email).await?.is_some() {
            return Err(AppError::conflict("email is already registered"));
        }

        let customer_number = generate_customer_number();
        let avatar_url = format!("{AVATAR_URL_BASE}{customer_number}");

        let user = User {
            id: String::new(),
            name: data.name,
            email: data.email,
            phone_number: data.phone_number,
            password: data.password,
            address: data.address,
            customer_number,
            role: data.role,
            // New accounts always start with a live connection
            connection_status: ConnectionStatus::Active,
            avatar_url,
        };

        let user = self.ds.users().create(user).await?;
        tracing::info!(
            user_id = %user.id,
            customer_number = %user.customer_number,
            role = %user.role,
            "user account created"
        );
        Ok(user)
    }

    async fn update_user(&self, id: &str, changes: UserChanges) -> AppResult<User> {
        let user = self.ds.users().update(id, changes).await?;
        tracing::info!(user_id = %user.id, "user profile updated");
        Ok(user)
    }

    async fn reset_password(&self, id: &str, new_password: &str) -> AppResult<()> {
        self.ds.users().set_password(id, new_password).await?;
        tracing::info!(user_id = id, "password reset");
        Ok(())
    }
}
