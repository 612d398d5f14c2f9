//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::DocumentStore;
use crate::services::{
    AuthService, BillingService, ReportService, ServiceContainer, Services, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Billing service
    pub billing_service: Arc<dyn BillingService>,
    /// Report service
    pub report_service: Arc<dyn ReportService>,
    /// Document store handle, kept for liveness probes
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Create application state from a document store and config.
    ///
    /// Wires every engine through the service container so all services
    /// share one datastore hub.
    pub fn from_store(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        let container = Services::from_store(store.clone(), config);
        Self::from_container(&container, store)
    }

    /// Create application state from an existing service container
    pub fn from_container(container: &dyn ServiceContainer, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            billing_service: container.billing(),
            report_service: container.reports(),
            store,
        }
    }
}
