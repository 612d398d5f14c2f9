//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Document Collections
// =============================================================================

/// Collection holding user accounts
pub const COLLECTION_USERS: &str = "users";

/// Collection holding monthly bills
pub const COLLECTION_BILLS: &str = "bills";

/// Collection holding customer problem reports
pub const COLLECTION_REPORTS: &str = "problemReports";

/// Collection holding pricing tariffs
pub const COLLECTION_TARIFFS: &str = "tariffs";

// =============================================================================
// Billing
// =============================================================================

/// Day of the following month a new bill falls due on
pub const BILL_DUE_DAY: u32 = 20;

/// Prefix for generated customer numbers
pub const CUSTOMER_NUMBER_PREFIX: &str = "CUST";

/// Base URL for generated avatar images, keyed by customer number
pub const AVATAR_URL_BASE: &str = "https://i.pravatar.cc/150?u=";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Minimum name length requirement
pub const MIN_NAME_LENGTH: u64 = 1;
