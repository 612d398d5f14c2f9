//! Problem report domain entity and workflow types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::FieldUpdate;

/// Workflow state of a problem report.
///
/// `Baru` (new) is the only state a report can be created in. `Selesai`
/// (resolved) is terminal: a resolved report never reopens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    Baru,
    Diproses,
    Selesai,
}

impl ReportStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReportStatus::Selesai)
    }
}

/// Customer-submitted problem report.
///
/// `assignee_id` is absent from the stored document while the report is
/// unassigned, not null, so serialization skips it when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemReport {
    /// Document id, kept outside the stored body
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    #[schema(example = "Air keruh")]
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub status: ReportStatus,
    pub reported_at: DateTime<Utc>,
    /// Field officer working the report, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
}

/// Submission payload for a new report.
///
/// Carries any assignee the caller tried to smuggle in so the engine can
/// reject the attempt instead of silently dropping it.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub location: String,
    pub photo_url: Option<String>,
    pub assignee_id: Option<String>,
}

/// Partial update to a report's workflow fields.
///
/// The assignee is a three-way field: leave it alone, point it at an
/// officer, or clear the assignment entirely.
#[derive(Debug, Clone, Default)]
pub struct ReportPatch {
    pub status: Option<ReportStatus>,
    pub assignee: FieldUpdate<String>,
}

impl ReportPatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.assignee.is_unchanged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn status_round_trips_through_wire_names() {
        let json = serde_json::to_string(&ReportStatus::Diproses).unwrap();
        assert_eq!(json, "\"DIPROSES\"");
        let status: ReportStatus = serde_json::from_str("\"SELESAI\"").unwrap();
        assert_eq!(status, ReportStatus::Selesai);
    }

    #[test]
    fn unassigned_report_omits_assignee_field() {
        let report = ProblemReport {
            id: "r-1".into(),
            user_id: "u-1".into(),
            title: "Air keruh".into(),
            description: "Air berwarna coklat sejak pagi".into(),
            location: "RT 02".into(),
            photo_url: None,
            status: ReportStatus::Baru,
            reported_at: Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap(),
            assignee_id: None,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("assigneeId").is_none());
        assert!(value.get("photoUrl").is_none());
        assert_eq!(value["status"], "BARU");
    }

    #[test]
    fn report_deserializes_without_optional_fields() {
        let report: ProblemReport = serde_json::from_value(serde_json::json!({
            "id": "r-2",
            "userId": "u-1",
            "title": "Pipa bocor",
            "description": "Pipa di depan rumah bocor",
            "location": "Jalan Melati 5",
            "status": "BARU",
            "reportedAt": "2024-07-01T08:00:00Z"
        }))
        .unwrap();
        assert_eq!(report.assignee_id, None);
        assert_eq!(report.photo_url, None);
    }
}
