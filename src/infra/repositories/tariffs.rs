//! Tariff repository over the `tariffs` collection.

use std::sync::Arc;

use async_trait::async_trait;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::from_document;
use crate::config::COLLECTION_TARIFFS;
use crate::domain::{Tariff, TariffChanges};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::document::{DocumentStore, FieldOp, Query};

/// Tariff repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TariffRepository: Send + Sync {
    /// Find tariff by document id
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Tariff>>;

    /// Every configured tariff
    async fn list(&self) -> AppResult<Vec<Tariff>>;

    /// The tariff flagged active. Ties break on lowest document id so
    /// billing stays deterministic if the flag is ever duplicated.
    async fn find_active(&self) -> AppResult<Option<Tariff>>;

    /// Apply pricing changes and return the updated tariff
    async fn update(&self, id: &str, changes: TariffChanges) -> AppResult<Tariff>;
}

/// Concrete tariff repository over a document store
pub struct TariffCollection {
    store: Arc<dyn DocumentStore>,
}

impl TariffCollection {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn fetch(&self, id: &str, operation: &'static str) -> AppResult<Option<Tariff>> {
        let body = self
            .store
            .get(COLLECTION_TARIFFS, id)
            .await
            .map_err(AppError::store("tariff", operation))?;
        body.map(|body| from_document(id, body))
            .transpose()
            .map_err(AppError::store("tariff", operation))
    }
}

#[async_trait]
impl TariffRepository for TariffCollection {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Tariff>> {
        self.fetch(id, "find_by_id").await
    }

    async fn list(&self) -> AppResult<Vec<Tariff>> {
        let rows = self
            .store
            .query(COLLECTION_TARIFFS, Query::new())
            .await
            .map_err(AppError::store("tariff", "list"))?;

        rows.into_iter()
            .map(|(id, body)| from_document(&id, body))
            .collect::<Result<_, _>>()
            .map_err(AppError::store("tariff", "list"))
    }

    async fn find_active(&self) -> AppResult<Option<Tariff>> {
        let mut rows = self
            .store
            .query(COLLECTION_TARIFFS, Query::new().filter("active", true))
            .await
            .map_err(AppError::store("tariff", "find_active"))?;

        rows.sort_by(|(a, _), (b, _)| a.cmp(b));
        rows.into_iter()
            .next()
            .map(|(id, body)| from_document(&id, body))
            .transpose()
            .map_err(AppError::store("tariff", "find_active"))
    }

    async fn update(&self, id: &str, changes: TariffChanges) -> AppResult<Tariff> {
        let mut ops = Vec::new();
        if let Some(name) = changes.name {
            ops.push(FieldOp::set("name", name.into()));
        }
        if let Some(rate) = changes.rate_per_m3 {
            ops.push(FieldOp::set("ratePerM3", rate.into()));
        }
        if let Some(fee) = changes.admin_fee {
            ops.push(FieldOp::set("adminFee", fee.into()));
        }
        if let Some(description) = changes.description {
            ops.push(FieldOp::set("description", description.into()));
        }
        if let Some(active) = changes.active {
            ops.push(FieldOp::set("active", active.into()));
        }

        if !ops.is_empty() {
            self.store
                .apply(COLLECTION_TARIFFS, id, ops)
                .await
                .map_err(AppError::store("tariff", "update"))?;
        }
        self.fetch(id, "update").await?.ok_or_not_found("tariff")
    }
}
