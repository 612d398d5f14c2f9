//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Regular customer account
    User,
    /// Back-office administrator
    Admin,
    /// Technician handling assigned problem reports
    FieldOfficer,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Check if this role handles report assignments
    pub fn is_field_officer(&self) -> bool {
        matches!(self, UserRole::FieldOfficer)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
            UserRole::FieldOfficer => "FIELD_OFFICER",
        };
        write!(f, "{}", label)
    }
}

/// Water connection state of a customer account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Active,
    Inactive,
}

/// User domain entity.
///
/// Serializes with the exact field names the document store uses, so the
/// struct round-trips through a collection document unchanged. The raw
/// credential is part of the document; [`UserResponse`] is the shape that
/// leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Document id, kept outside the stored body
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub address: String,
    pub customer_number: String,
    pub role: UserRole,
    pub connection_status: ConnectionStatus,
    pub avatar_url: String,
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub address: String,
    pub role: UserRole,
}

/// Partial profile update; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub connection_status: Option<ConnectionStatus>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.address.is_none()
            && self.connection_status.is_none()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user identifier
    pub id: String,
    /// Display name
    #[schema(example = "Budi Santoso")]
    pub name: String,
    /// Login email address
    #[schema(example = "budi@example.com")]
    pub email: String,
    pub phone_number: String,
    pub address: String,
    /// Utility-assigned customer number
    #[schema(example = "CUST001234")]
    pub customer_number: String,
    pub role: UserRole,
    pub connection_status: ConnectionStatus,
    pub avatar_url: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone_number: user.phone_number,
            address: user.address,
            customer_number: user.customer_number,
            role: user.role,
            connection_status: user.connection_status,
            avatar_url: user.avatar_url,
        }
    }
}
