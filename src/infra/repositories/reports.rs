//! Problem report repository over the `problemReports` collection.

use std::sync::Arc;

use async_trait::async_trait;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::{from_document, to_document, to_value};
use crate::config::COLLECTION_REPORTS;
use crate::domain::{ProblemReport, ReportPatch};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::document::{DocumentStore, FieldOp, Query};
use crate::types::FieldUpdate;

/// Report repository trait for dependency injection
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Find report by document id
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ProblemReport>>;

    /// Store a new report, returning it with its assigned id
    async fn insert(&self, report: ProblemReport) -> AppResult<ProblemReport>;

    /// Every report, newest first
    async fn list_all(&self) -> AppResult<Vec<ProblemReport>>;

    /// One reporter's reports, newest first
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<ProblemReport>>;

    /// Reports assigned to one field officer, newest first
    async fn list_assigned_to(&self, officer_id: &str) -> AppResult<Vec<ProblemReport>>;

    /// Apply workflow changes and return the updated report.
    ///
    /// Clearing the assignee removes the field from the document rather
    /// than writing a null.
    async fn apply_patch(&self, id: &str, patch: ReportPatch) -> AppResult<ProblemReport>;
}

/// Concrete report repository over a document store
pub struct ReportCollection {
    store: Arc<dyn DocumentStore>,
}

impl ReportCollection {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn query_reports(
        &self,
        query: Query,
        operation: &'static str,
    ) -> AppResult<Vec<ProblemReport>> {
        let rows = self
            .store
            .query(COLLECTION_REPORTS, query)
            .await
            .map_err(AppError::store("report", operation))?;

        rows.into_iter()
            .map(|(id, body)| from_document(&id, body))
            .collect::<Result<_, _>>()
            .map_err(AppError::store("report", operation))
    }
}

#[async_trait]
impl ReportRepository for ReportCollection {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ProblemReport>> {
        let body = self
            .store
            .get(COLLECTION_REPORTS, id)
            .await
            .map_err(AppError::store("report", "find_by_id"))?;
        body.map(|body| from_document(id, body))
            .transpose()
            .map_err(AppError::store("report", "find_by_id"))
    }

    async fn insert(&self, report: ProblemReport) -> AppResult<ProblemReport> {
        let body = to_document(&report).map_err(AppError::store("report", "insert"))?;
        let id = self
            .store
            .insert(COLLECTION_REPORTS, body)
            .await
            .map_err(AppError::store("report", "insert"))?;
        Ok(ProblemReport { id, ..report })
    }

    async fn list_all(&self) -> AppResult<Vec<ProblemReport>> {
        self.query_reports(Query::new().order_desc("reportedAt"), "list_all")
            .await
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<ProblemReport>> {
        self.query_reports(
            Query::new()
                .filter("userId", user_id)
                .order_desc("reportedAt"),
            "list_for_user",
        )
        .await
    }

    async fn list_assigned_to(&self, officer_id: &str) -> AppResult<Vec<ProblemReport>> {
        self.query_reports(
            Query::new()
                .filter("assigneeId", officer_id)
                .order_desc("reportedAt"),
            "list_assigned_to",
        )
        .await
    }

    async fn apply_patch(&self, id: &str, patch: ReportPatch) -> AppResult<ProblemReport> {
        let mut ops = Vec::new();
        if let Some(status) = patch.status {
            let value = to_value(&status).map_err(AppError::store("report", "apply_patch"))?;
            ops.push(FieldOp::set("status", value));
        }
        match patch.assignee {
            FieldUpdate::Unchanged => {}
            FieldUpdate::Set(officer_id) => {
                ops.push(FieldOp::set("assigneeId", officer_id.into()));
            }
            FieldUpdate::Clear => {
                ops.push(FieldOp::remove("assigneeId"));
            }
        }

        if !ops.is_empty() {
            self.store
                .apply(COLLECTION_REPORTS, id, ops)
                .await
                .map_err(AppError::store("report", "apply_patch"))?;
        }
        self.find_by_id(id).await?.ok_or_not_found("report")
    }
}
