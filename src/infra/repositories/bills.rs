//! Bill repository over the `bills` collection.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::{from_document, to_document, to_value};
use crate::config::COLLECTION_BILLS;
use crate::domain::{Bill, BillStatus};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::document::{DocumentStore, FieldOp, Query};

/// Bill repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BillRepository: Send + Sync {
    /// Find bill by document id
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Bill>>;

    /// Store a new bill, returning it with its assigned id
    async fn insert(&self, bill: Bill) -> AppResult<Bill>;

    /// Every bill, newest due date first
    async fn list_all(&self) -> AppResult<Vec<Bill>>;

    /// One customer's bills, newest due date first
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Bill>>;

    /// Outstanding bills across all customers, newest due date first
    async fn list_unpaid(&self) -> AppResult<Vec<Bill>>;

    /// The customer's most recent bill by due date, if any
    async fn latest_for_user(&self, user_id: &str) -> AppResult<Option<Bill>>;

    /// Flip a bill to paid, stamping the settlement time
    async fn mark_paid(&self, id: &str, paid_at: DateTime<Utc>) -> AppResult<Bill>;
}

/// Concrete bill repository over a document store
pub struct BillCollection {
    store: Arc<dyn DocumentStore>,
}

impl BillCollection {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn query_bills(&self, query: Query, operation: &'static str) -> AppResult<Vec<Bill>> {
        let rows = self
            .store
            .query(COLLECTION_BILLS, query)
            .await
            .map_err(AppError::store("bill", operation))?;

        rows.into_iter()
            .map(|(id, body)| from_document(&id, body))
            .collect::<Result<_, _>>()
            .map_err(AppError::store("bill", operation))
    }
}

#[async_trait]
impl BillRepository for BillCollection {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Bill>> {
        let body = self
            .store
            .get(COLLECTION_BILLS, id)
            .await
            .map_err(AppError::store("bill", "find_by_id"))?;
        body.map(|body| from_document(id, body))
            .transpose()
            .map_err(AppError::store("bill", "find_by_id"))
    }

    async fn insert(&self, bill: Bill) -> AppResult<Bill> {
        let body = to_document(&bill).map_err(AppError::store("bill", "insert"))?;
        let id = self
            .store
            .insert(COLLECTION_BILLS, body)
            .await
            .map_err(AppError::store("bill", "insert"))?;
        Ok(Bill { id, ..bill })
    }

    async fn list_all(&self) -> AppResult<Vec<Bill>> {
        self.query_bills(Query::new().order_desc("dueDate"), "list_all")
            .await
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Bill>> {
        self.query_bills(
            Query::new().filter("userId", user_id).order_desc("dueDate"),
            "list_for_user",
        )
        .await
    }

    async fn list_unpaid(&self) -> AppResult<Vec<Bill>> {
        let unpaid = to_value(&BillStatus::Unpaid).map_err(AppError::store("bill", "list_unpaid"))?;
        self.query_bills(
            Query::new().filter("status", unpaid).order_desc("dueDate"),
            "list_unpaid",
        )
        .await
    }

    async fn latest_for_user(&self, user_id: &str) -> AppResult<Option<Bill>> {
        let bills = self
            .query_bills(
                Query::new().filter("userId", user_id).order_desc("dueDate"),
                "latest_for_user",
            )
            .await?;
        Ok(bills.into_iter().next())
    }

    async fn mark_paid(&self, id: &str, paid_at: DateTime<Utc>) -> AppResult<Bill> {
        let status = to_value(&BillStatus::Paid).map_err(AppError::store("bill", "mark_paid"))?;
        let paid_at = to_value(&paid_at).map_err(AppError::store("bill", "mark_paid"))?;
        self.store
            .apply(
                COLLECTION_BILLS,
                id,
                vec![
                    FieldOp::set("status", status),
                    FieldOp::set("paidDate", paid_at),
                ],
            )
            .await
            .map_err(AppError::store("bill", "mark_paid"))?;
        self.find_by_id(id).await?.ok_or_not_found("bill")
    }
}
