//! Authenticated caller identity.

use crate::domain::UserRole;

/// Identity attached to a request after token verification.
///
/// This is everything the access layer needs to decide what the caller
/// may do; handlers pass it down instead of re-reading the user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_field_officer(&self) -> bool {
        self.role.is_field_officer()
    }
}
