//! Datastore hub.
//!
//! Centralizes access to all typed repositories behind one trait so the
//! engines can be tested against mock repositories without touching a
//! real store. The document backend has no multi-document transactions;
//! every repository call is an independent atomic write.

use std::sync::Arc;

use super::document::DocumentStore;
use super::repositories::{
    BillCollection, BillRepository, ReportCollection, ReportRepository, TariffCollection,
    TariffRepository, UserCollection, UserRepository,
};

/// Repository access for the engines
pub trait Datastore: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get bill repository
    fn bills(&self) -> Arc<dyn BillRepository>;

    /// Get report repository
    fn reports(&self) -> Arc<dyn ReportRepository>;

    /// Get tariff repository
    fn tariffs(&self) -> Arc<dyn TariffRepository>;
}

/// Concrete implementation of Datastore over a document store
pub struct Persistence {
    users: Arc<UserCollection>,
    bills: Arc<BillCollection>,
    reports: Arc<ReportCollection>,
    tariffs: Arc<TariffCollection>,
}

impl Persistence {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            users: Arc::new(UserCollection::new(store.clone())),
            bills: Arc::new(BillCollection::new(store.clone())),
            reports: Arc::new(ReportCollection::new(store.clone())),
            tariffs: Arc::new(TariffCollection::new(store)),
        }
    }
}

impl Datastore for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn bills(&self) -> Arc<dyn BillRepository> {
        self.bills.clone()
    }

    fn reports(&self) -> Arc<dyn ReportRepository> {
        self.reports.clone()
    }

    fn tariffs(&self) -> Arc<dyn TariffRepository> {
        self.tariffs.clone()
    }
}
