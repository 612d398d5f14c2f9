//! User repository over the `users` collection.

use std::sync::Arc;

use async_trait::async_trait;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::{from_document, to_document, to_value};
use crate::config::COLLECTION_USERS;
use crate::domain::{User, UserChanges};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::document::{DocumentStore, FieldOp, Query};

/// User repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by document id
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// Find user by login email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List every user account
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Store a new user, returning it with its assigned id
    async fn create(&self, user: User) -> AppResult<User>;

    /// Apply profile changes and return the updated record
    async fn update(&self, id: &str, changes: UserChanges) -> AppResult<User>;

    /// Overwrite the stored credential
    async fn set_password(&self, id: &str, password: &str) -> AppResult<()>;
}

/// Concrete user repository over a document store
pub struct UserCollection {
    store: Arc<dyn DocumentStore>,
}

impl UserCollection {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn fetch(&self, id: &str, operation: &'static str) -> AppResult<Option<User>> {
        let body = self
            .store
            .get(COLLECTION_USERS, id)
            .await
            .map_err(AppError::store("user", operation))?;
        body.map(|body| from_document(id, body))
            .transpose()
            .map_err(AppError::store("user", operation))
    }
}

#[async_trait]
impl UserRepository for UserCollection {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.fetch(id, "find_by_id").await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let rows = self
            .store
            .query(COLLECTION_USERS, Query::new().filter("email", email))
            .await
            .map_err(AppError::store("user", "find_by_email"))?;

        rows.into_iter()
            .next()
            .map(|(id, body)| from_document(&id, body))
            .transpose()
            .map_err(AppError::store("user", "find_by_email"))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let rows = self
            .store
            .query(COLLECTION_USERS, Query::new())
            .await
            .map_err(AppError::store("user", "list"))?;

        rows.into_iter()
            .map(|(id, body)| from_document(&id, body))
            .collect::<Result<_, _>>()
            .map_err(AppError::store("user", "list"))
    }

    async fn create(&self, user: User) -> AppResult<User> {
        let body = to_document(&user).map_err(AppError::store("user", "create"))?;
        let id = self
            .store
            .insert(COLLECTION_USERS, body)
            .await
            .map_err(AppError::store("user", "create"))?;
        Ok(User { id, ..user })
    }

    async fn update(&self, id: &str, changes: UserChanges) -> AppResult<User> {
        let mut ops = Vec::new();
        if let Some(name) = changes.name {
            ops.push(FieldOp::set("name", name.into()));
        }
        if let Some(email) = changes.email {
            ops.push(FieldOp::set("email", email.into()));
        }
        if let Some(phone_number) = changes.phone_number {
            ops.push(FieldOp::set("phoneNumber", phone_number.into()));
        }
        if let Some(address) = changes.address {
            ops.push(FieldOp::set("address", address.into()));
        }
        if let Some(status) = changes.connection_status {
            let value = to_value(&status).map_err(AppError::store("user", "update"))?;
            ops.push(FieldOp::set("connectionStatus", value));
        }

        if !ops.is_empty() {
            self.store
                .apply(COLLECTION_USERS, id, ops)
                .await
                .map_err(AppError::store("user", "update"))?;
        }
        self.fetch(id, "update").await?.ok_or_not_found("user")
    }

    async fn set_password(&self, id: &str, password: &str) -> AppResult<()> {
        self.store
            .apply(
                COLLECTION_USERS,
                id,
                vec![FieldOp::set("password", password.into())],
            )
            .await
            .map_err(AppError::store("user", "set_password"))
    }
}
