//! HTTP request handlers.

pub mod admin_handler;
pub mod auth_handler;
pub mod billing_handler;
pub mod report_handler;
pub mod user_handler;

pub use admin_handler::admin_routes;
pub use auth_handler::auth_routes;
pub use billing_handler::{bill_routes, billing_routes, tariff_routes};
pub use report_handler::report_routes;
pub use user_handler::{profile_routes, user_routes};
