//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, auth_handler, billing_handler, report_handler, user_handler,
};
use crate::domain::{
    Bill, BillStatus, ConnectionStatus, ProblemReport, ReportStatus, Tariff, UserResponse,
    UserRole,
};
use crate::services::TokenResponse;

/// OpenAPI documentation for the PAM Desa API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PAM Desa API",
        version = "0.1.0",
        description = "Village water utility backend: customer accounts, meter-reading billing, and problem report workflow",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "API Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server"),
        (url = "https://api.example.com", description = "Production server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::login,
        // Profile endpoints
        user_handler::get_profile,
        user_handler::update_profile,
        // User directory endpoints
        user_handler::list_users,
        user_handler::create_user,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::reset_password,
        // Billing endpoints
        billing_handler::list_bills,
        billing_handler::list_my_bills,
        billing_handler::record_reading,
        billing_handler::settle_bill,
        billing_handler::list_tariffs,
        billing_handler::update_tariff,
        // Report endpoints
        report_handler::submit_report,
        report_handler::list_reports,
        report_handler::list_my_reports,
        report_handler::list_assigned_reports,
        report_handler::get_report,
        report_handler::update_report,
        // Admin endpoints
        admin_handler::overview,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            ConnectionStatus,
            UserResponse,
            Bill,
            BillStatus,
            Tariff,
            ProblemReport,
            ReportStatus,
            // Auth types
            auth_handler::LoginRequest,
            auth_handler::LoginResponse,
            TokenResponse,
            // User handler types
            user_handler::CreateUserRequest,
            user_handler::UpdateUserRequest,
            user_handler::UpdateProfileRequest,
            user_handler::ResetPasswordRequest,
            // Billing handler types
            billing_handler::RecordReadingRequest,
            billing_handler::UpdateTariffRequest,
            // Report handler types
            report_handler::SubmitReportRequest,
            report_handler::UpdateReportRequest,
            // Admin handler types
            admin_handler::OverviewResponse,
            admin_handler::ReportsByStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Session login"),
        (name = "Profile", description = "The caller's own account"),
        (name = "Users", description = "Customer and staff account administration"),
        (name = "Bills", description = "Meter readings and bill settlement"),
        (name = "Tariffs", description = "Water rate schedule"),
        (name = "Reports", description = "Problem report workflow"),
        (name = "Admin", description = "Dashboard aggregates")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
