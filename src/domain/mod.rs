//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod bill;
pub mod report;
pub mod session;
pub mod tariff;
pub mod user;

pub use bill::{due_date_following_month, period_label, Bill, BillStatus};
pub use report::{NewReport, ProblemReport, ReportPatch, ReportStatus};
pub use session::Session;
pub use tariff::{Tariff, TariffChanges};
pub use user::{ConnectionStatus, NewUser, User, UserChanges, UserResponse, UserRole};
