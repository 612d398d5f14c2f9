//! Report engine tests over the in-memory store.
//!
//! These run the real repositories and document store end to end, so
//! workflow rules are checked against actual stored documents.

use std::sync::Arc;

use serde_json::json;

use pam_desa_api::domain::{NewReport, ReportPatch, ReportStatus};
use pam_desa_api::errors::AppError;
use pam_desa_api::infra::{MemoryStore, Persistence};
use pam_desa_api::services::{ReportEngine, ReportService};
use pam_desa_api::types::FieldUpdate;

fn new_report(title: &str) -> NewReport {
    NewReport {
        title: title.to_string(),
        description: "Air berwarna coklat sejak pagi".to_string(),
        location: "RT 02, Desa Sukamaju".to_string(),
        photo_url: None,
        assignee_id: None,
    }
}

async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store
        .seed(json!({
            "users": [
                {
                    "id": "user-budi",
                    "name": "Budi Santoso",
                    "email": "budi@example.com",
                    "phoneNumber": "081311122233",
                    "password": "rahasia123",
                    "address": "Jalan Melati No. 5",
                    "customerNumber": "CUST104217",
                    "role": "USER",
                    "connectionStatus": "active",
                    "avatarUrl": "https://i.pravatar.cc/150?u=CUST104217"
                },
                {
                    "id": "user-officer",
                    "name": "Dedi Kurniawan",
                    "email": "dedi@pamdesa.id",
                    "phoneNumber": "081298765432",
                    "password": "petugas123",
                    "address": "Dusun Krajan RT 01",
                    "customerNumber": "CUST000002",
                    "role": "FIELD_OFFICER",
                    "connectionStatus": "active",
                    "avatarUrl": "https://i.pravatar.cc/150?u=CUST000002"
                }
            ]
        }))
        .await
        .unwrap();
    store
}

fn report_engine(store: Arc<MemoryStore>) -> ReportEngine<Persistence> {
    ReportEngine::new(Arc::new(Persistence::new(store)))
}

#[tokio::test]
async fn test_submitted_report_starts_new_and_unassigned() {
    let store = seeded_store().await;
    let engine = report_engine(store);

    let report = engine
        .submit_report("user-budi", new_report("Air keruh"))
        .await
        .unwrap();

    assert_eq!(report.status, ReportStatus::Baru);
    assert_eq!(report.assignee_id, None);
    assert_eq!(report.user_id, "user-budi");
    assert!(!report.id.is_empty());

    let listed = engine.list_reports_for_user("user-budi").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, report.id);
}

#[tokio::test]
async fn test_submission_cannot_pick_an_assignee() {
    let store = seeded_store().await;
    let engine = report_engine(store);

    let mut report = new_report("Air keruh");
    report.assignee_id = Some("user-officer".to_string());
    let result = engine.submit_report("user-budi", report).await;

    assert!(matches!(
        result.unwrap_err(),
        AppError::AssignmentNotAllowed
    ));
}

#[tokio::test]
async fn test_submission_requires_title() {
    let store = seeded_store().await;
    let engine = report_engine(store);

    let result = engine.submit_report("user-budi", new_report("   ")).await;

    match result.unwrap_err() {
        AppError::Validation(msg) => assert!(msg.contains("title")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_resolved_report_cannot_reopen() {
    let store = seeded_store().await;
    let engine = report_engine(store.clone());

    let report = engine
        .submit_report("user-budi", new_report("Pipa bocor"))
        .await
        .unwrap();
    engine
        .update_report(
            &report.id,
            ReportPatch {
                status: Some(ReportStatus::Selesai),
                assignee: FieldUpdate::Unchanged,
            },
        )
        .await
        .unwrap();

    let result = engine
        .update_report(
            &report.id,
            ReportPatch {
                status: Some(ReportStatus::Baru),
                assignee: FieldUpdate::Unchanged,
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));

    // Still resolved afterwards
    let current = engine.get_report(&report.id).await.unwrap();
    assert_eq!(current.status, ReportStatus::Selesai);
}

#[tokio::test]
async fn test_assignee_must_be_a_field_officer() {
    let store = seeded_store().await;
    let engine = report_engine(store);

    let report = engine
        .submit_report("user-budi", new_report("Air keruh"))
        .await
        .unwrap();

    // A customer cannot be assigned
    let result = engine
        .update_report(
            &report.id,
            ReportPatch {
                status: None,
                assignee: FieldUpdate::Set("user-budi".to_string()),
            },
        )
        .await;
    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));

    // An unknown user cannot be assigned
    let result = engine
        .update_report(
            &report.id,
            ReportPatch {
                status: None,
                assignee: FieldUpdate::Set("ghost".to_string()),
            },
        )
        .await;
    assert!(matches!(result.unwrap_err(), AppError::NotFound("user")));

    // A field officer can
    let updated = engine
        .update_report(
            &report.id,
            ReportPatch {
                status: Some(ReportStatus::Diproses),
                assignee: FieldUpdate::Set("user-officer".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.assignee_id.as_deref(), Some("user-officer"));
    assert_eq!(updated.status, ReportStatus::Diproses);

    let assigned = engine
        .list_reports_assigned_to("user-officer")
        .await
        .unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].id, report.id);
}

#[tokio::test]
async fn test_clearing_assignment_removes_the_stored_field() {
    let store = seeded_store().await;
    let engine = report_engine(store.clone());

    let report = engine
        .submit_report("user-budi", new_report("Air keruh"))
        .await
        .unwrap();
    engine
        .update_report(
            &report.id,
            ReportPatch {
                status: None,
                assignee: FieldUpdate::Set("user-officer".to_string()),
            },
        )
        .await
        .unwrap();

    let updated = engine
        .update_report(
            &report.id,
            ReportPatch {
                status: None,
                assignee: FieldUpdate::Clear,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.assignee_id, None);

    // The key is gone from the document, not set to null
    use pam_desa_api::infra::DocumentStore;
    let body = store
        .get("problemReports", &report.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!body.contains_key("assigneeId"));
}

#[tokio::test]
async fn test_admin_listing_filters_orphaned_reports() {
    let store = seeded_store().await;
    store
        .seed(json!({
            "problemReports": [
                {
                    "id": "report-orphan",
                    "userId": "user-deleted",
                    "title": "Air mati total",
                    "description": "Tidak ada air sejak kemarin",
                    "location": "RT 05",
                    "status": "BARU",
                    "reportedAt": "2024-07-01T08:00:00Z"
                }
            ]
        }))
        .await
        .unwrap();

    let engine = report_engine(store);
    let report = engine
        .submit_report("user-budi", new_report("Air keruh"))
        .await
        .unwrap();

    let all = engine.list_all_reports().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, report.id);
}
