//! Access layer - role and identity checks.
//!
//! Every identity-based decision funnels through here so the engines can
//! stay role-agnostic: they validate data invariants and trust their
//! caller. Handlers resolve the resource, consult this module, then call
//! the engine.
//!
//! All matches over [`UserRole`] are exhaustive. A new role refuses to
//! compile until every rule here has decided what it may do.

use crate::domain::{ProblemReport, ReportPatch, ReportStatus, Session, UserRole};
use crate::errors::{AppError, AppResult};

/// Only administrators pass
pub fn require_admin(session: &Session) -> AppResult<()> {
    match session.role {
        UserRole::Admin => Ok(()),
        UserRole::User | UserRole::FieldOfficer => Err(AppError::Forbidden),
    }
}

/// Only field officers pass
pub fn require_field_officer(session: &Session) -> AppResult<()> {
    match session.role {
        UserRole::FieldOfficer => Ok(()),
        UserRole::User | UserRole::Admin => Err(AppError::Forbidden),
    }
}

/// The caller themselves, or an administrator acting on their behalf
pub fn require_self_or_admin(session: &Session, user_id: &str) -> AppResult<()> {
    if session.user_id == user_id {
        return Ok(());
    }
    require_admin(session)
}

/// Who may see a single report: administrators, the reporter, and the
/// field officer it is currently assigned to.
pub fn authorize_report_view(session: &Session, report: &ProblemReport) -> AppResult<()> {
    match session.role {
        UserRole::Admin => Ok(()),
        UserRole::User => {
            if report.user_id == session.user_id {
                Ok(())
            } else {
                Err(AppError::Forbidden)
            }
        }
        UserRole::FieldOfficer => {
            if report.assignee_id.as_deref() == Some(session.user_id.as_str()) {
                Ok(())
            } else {
                Err(AppError::Forbidden)
            }
        }
    }
}

/// Who may change a report, and how.
///
/// Administrators may change anything. A field officer may only work a
/// report currently assigned to them, may never touch the assignment
/// itself, and may only move the status forward to `Diproses` or
/// `Selesai`. Customers never patch reports.
pub fn authorize_report_patch(
    session: &Session,
    report: &ProblemReport,
    patch: &ReportPatch,
) -> AppResult<()> {
    match session.role {
        UserRole::Admin => Ok(()),
        UserRole::User => Err(AppError::Forbidden),
        UserRole::FieldOfficer => {
            if report.assignee_id.as_deref() != Some(session.user_id.as_str()) {
                return Err(AppError::Forbidden);
            }
            if !patch.assignee.is_unchanged() {
                return Err(AppError::Forbidden);
            }
            match patch.status {
                None | Some(ReportStatus::Diproses) | Some(ReportStatus::Selesai) => Ok(()),
                Some(ReportStatus::Baru) => Err(AppError::Forbidden),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldUpdate;
    use chrono::Utc;

    fn session(user_id: &str, role: UserRole) -> Session {
        Session {
            user_id: user_id.to_string(),
            email: format!("{user_id}@example.com"),
            role,
        }
    }

    fn report(user_id: &str, assignee_id: Option<&str>) -> ProblemReport {
        ProblemReport {
            id: "r-1".into(),
            user_id: user_id.to_string(),
            title: "Air keruh".into(),
            description: "Air berwarna coklat".into(),
            location: "RT 02".into(),
            photo_url: None,
            status: ReportStatus::Baru,
            reported_at: Utc::now(),
            assignee_id: assignee_id.map(String::from),
        }
    }

    #[test]
    fn admin_checks_reject_other_roles() {
        assert!(require_admin(&session("a", UserRole::Admin)).is_ok());
        assert!(require_admin(&session("u", UserRole::User)).is_err());
        assert!(require_admin(&session("o", UserRole::FieldOfficer)).is_err());
    }

    #[test]
    fn self_or_admin_allows_both() {
        assert!(require_self_or_admin(&session("u1", UserRole::User), "u1").is_ok());
        assert!(require_self_or_admin(&session("a", UserRole::Admin), "u1").is_ok());
        assert!(require_self_or_admin(&session("u2", UserRole::User), "u1").is_err());
    }

    #[test]
    fn report_view_limited_to_involved_parties() {
        let r = report("u1", Some("o1"));
        assert!(authorize_report_view(&session("a", UserRole::Admin), &r).is_ok());
        assert!(authorize_report_view(&session("u1", UserRole::User), &r).is_ok());
        assert!(authorize_report_view(&session("o1", UserRole::FieldOfficer), &r).is_ok());
        assert!(authorize_report_view(&session("u2", UserRole::User), &r).is_err());
        assert!(authorize_report_view(&session("o2", UserRole::FieldOfficer), &r).is_err());
    }

    #[test]
    fn officer_can_progress_own_assignment() {
        let r = report("u1", Some("o1"));
        let patch = ReportPatch {
            status: Some(ReportStatus::Diproses),
            assignee: FieldUpdate::Unchanged,
        };
        assert!(authorize_report_patch(&session("o1", UserRole::FieldOfficer), &r, &patch).is_ok());
    }

    #[test]
    fn officer_cannot_touch_unassigned_report() {
        let r = report("u1", None);
        let patch = ReportPatch {
            status: Some(ReportStatus::Diproses),
            assignee: FieldUpdate::Unchanged,
        };
        assert!(
            authorize_report_patch(&session("o1", UserRole::FieldOfficer), &r, &patch).is_err()
        );
    }

    #[test]
    fn officer_cannot_reassign_or_rewind() {
        let r = report("u1", Some("o1"));
        let reassign = ReportPatch {
            status: None,
            assignee: FieldUpdate::Set("o2".into()),
        };
        assert!(
            authorize_report_patch(&session("o1", UserRole::FieldOfficer), &r, &reassign).is_err()
        );

        let rewind = ReportPatch {
            status: Some(ReportStatus::Baru),
            assignee: FieldUpdate::Unchanged,
        };
        assert!(
            authorize_report_patch(&session("o1", UserRole::FieldOfficer), &r, &rewind).is_err()
        );
    }

    #[test]
    fn customers_never_patch_reports() {
        let r = report("u1", None);
        let patch = ReportPatch::default();
        assert!(authorize_report_patch(&session("u1", UserRole::User), &r, &patch).is_err());
    }
}
