//! Service Container - Centralized service access with parallel execution support.
//!
//! Wires the engines to a datastore and hands the API layer trait
//! objects, so handlers never see concrete engine types.

use std::future::Future;
use std::sync::Arc;

use super::{AuthService, Authenticator, BillingEngine, BillingService, ReportEngine,
    ReportService, UserDirectory, UserService};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{DocumentStore, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get billing service
    fn billing(&self) -> Arc<dyn BillingService>;

    /// Get report service
    fn reports(&self) -> Arc<dyn ReportService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    billing_service: Arc<dyn BillingService>,
    report_service: Arc<dyn ReportService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        billing_service: Arc<dyn BillingService>,
        report_service: Arc<dyn ReportService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            billing_service,
            report_service,
        }
    }

    /// Create service container from a document store and config
    pub fn from_store(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        let ds = Arc::new(Persistence::new(store));
        let auth_service = Arc::new(Authenticator::new(ds.clone(), config));
        let user_service = Arc::new(UserDirectory::new(ds.clone()));
        let billing_service = Arc::new(BillingEngine::new(ds.clone()));
        let report_service = Arc::new(ReportEngine::new(ds));

        Self {
            auth_service,
            user_service,
            billing_service,
            report_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn billing(&self) -> Arc<dyn BillingService> {
        self.billing_service.clone()
    }

    fn reports(&self) -> Arc<dyn ReportService> {
        self.report_service.clone()
    }
}

/// Parallel execution utilities for running independent operations concurrently.
///
/// These functions leverage tokio's async runtime to execute multiple
/// independent operations in parallel, improving throughput.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Execute two independent async operations in parallel.
    ///
    /// Both operations run concurrently and the function returns when both complete.
    /// If either operation fails, the error is returned immediately.
    ///
    /// # Example
    /// ```ignore
    /// let (reports, users) = parallel::join2(
    ///     ds.reports().list_all(),
    ///     ds.users().list(),
    /// ).await?;
    /// ```
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }

    /// Execute three independent async operations in parallel.
    pub async fn join3<F1, F2, F3, T1, T2, T3>(
        f1: F1,
        f2: F2,
        f3: F3,
    ) -> AppResult<(T1, T2, T3)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
    {
        try_join!(f1, f2, f3)
    }
}
