//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services go through the datastore hub for repository access.

mod auth_service;
mod billing_service;
pub mod container;
mod report_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, AuthSession, Authenticator, Claims, TokenResponse};
pub use billing_service::{BillingEngine, BillingService};
pub use report_service::{ReportEngine, ReportService};
pub use user_service::{UserDirectory, UserService};

// Parallel execution utilities
pub use container::parallel;

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
