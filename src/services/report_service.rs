//! Report engine - problem report submission and workflow updates.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::container::parallel;
use crate::domain::{NewReport, ProblemReport, ReportPatch, ReportStatus, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Datastore;
use crate::types::FieldUpdate;

/// Report service trait for dependency injection
#[async_trait]
pub trait ReportService: Send + Sync {
    /// File a new report for the given customer.
    ///
    /// Reports always start in `Baru` with no assignee; a submission
    /// that tries to pick its own assignee is rejected outright.
    async fn submit_report(&self, user_id: &str, report: NewReport) -> AppResult<ProblemReport>;

    /// Get report by id
    async fn get_report(&self, report_id: &str) -> AppResult<ProblemReport>;

    /// Apply workflow changes: status moves and assignment hand-offs.
    ///
    /// A resolved report never leaves `Selesai`. Assignees must be
    /// existing field officers; clearing an assignment removes the field
    /// from the document.
    async fn update_report(&self, report_id: &str, patch: ReportPatch)
        -> AppResult<ProblemReport>;

    /// Every report whose reporter still exists, newest first.
    ///
    /// Reports pointing at unknown users are filtered out rather than
    /// surfaced with broken reporter details.
    async fn list_all_reports(&self) -> AppResult<Vec<ProblemReport>>;

    /// One reporter's reports, newest first
    async fn list_reports_for_user(&self, user_id: &str) -> AppResult<Vec<ProblemReport>>;

    /// Reports assigned to one field officer, newest first
    async fn list_reports_assigned_to(&self, officer_id: &str) -> AppResult<Vec<ProblemReport>>;
}

/// Concrete implementation of ReportService over the datastore
pub struct ReportEngine<D: Datastore> {
    ds: Arc<D>,
}

impl<D: Datastore> ReportEngine<D> {
    pub fn new(ds: Arc<D>) -> Self {
        Self { ds }
    }
}

fn require_field(name: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{name} is required")));
    }
    Ok(())
}

#[async_trait]
impl<D: Datastore> ReportService for ReportEngine<D> {
    async fn submit_report(&self, user_id: &str, report: NewReport) -> AppResult<ProblemReport> {
        if report.assignee_id.is_some() {
            return Err(AppError::AssignmentNotAllowed);
        }
        require_field("title", &report.title)?;
        require_field("description", &report.description)?;
        require_field("location", &report.location)?;

        let report = ProblemReport {
            id: String::new(),
            user_id: user_id.to_string(),
            title: report.title,
            description: report.description,
            location: report.location,
            photo_url: report.photo_url,
            status: ReportStatus::Baru,
            reported_at: Utc::now(),
            assignee_id: None,
        };

        let report = self.ds.reports().insert(report).await?;
        tracing::info!(user_id, report_id = %report.id, "problem report submitted");
        Ok(report)
    }

    async fn get_report(&self, report_id: &str) -> AppResult<ProblemReport> {
        self.ds
            .reports()
            .find_by_id(report_id)
            .await?
            .ok_or_not_found("report")
    }

    async fn update_report(
        &self,
        report_id: &str,
        patch: ReportPatch,
    ) -> AppResult<ProblemReport> {
        let current = self.get_report(report_id).await?;

        if let Some(next) = patch.status {
            if current.status.is_terminal() && !next.is_terminal() {
                return Err(AppError::validation("a resolved report cannot be reopened"));
            }
        }

        if let FieldUpdate::Set(assignee_id) = &patch.assignee {
            let assignee = self
                .ds
                .users()
                .find_by_id(assignee_id)
                .await?
                .ok_or_not_found("user")?;
            if assignee.role != UserRole::FieldOfficer {
                return Err(AppError::validation(
                    "assigneeId must reference a field officer",
                ));
            }
        }

        let report = self.ds.reports().apply_patch(report_id, patch).await?;
        tracing::info!(
            report_id,
            status = ?report.status,
            assignee = report.assignee_id.as_deref().unwrap_or("-"),
            "problem report updated"
        );
        Ok(report)
    }

    async fn list_all_reports(&self) -> AppResult<Vec<ProblemReport>> {
        let (reports, users) =
            parallel::join2(self.ds.reports().list_all(), self.ds.users().list()).await?;

        let known: HashSet<&str> = users.iter().map(|user| user.id.as_str()).collect();
        Ok(reports
            .into_iter()
            .filter(|report| known.contains(report.user_id.as_str()))
            .collect())
    }

    async fn list_reports_for_user(&self, user_id: &str) -> AppResult<Vec<ProblemReport>> {
        self.ds.reports().list_for_user(user_id).await
    }

    async fn list_reports_assigned_to(&self, officer_id: &str) -> AppResult<Vec<ProblemReport>> {
        self.ds.reports().list_assigned_to(officer_id).await
    }
}
