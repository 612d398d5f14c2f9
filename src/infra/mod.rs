//! Infrastructure layer - External systems integration
//!
//! This module owns everything that touches storage:
//! - The document-store client abstraction and its in-memory backend
//! - Typed repositories over the collections
//! - The datastore hub handed to the engines

pub mod datastore;
pub mod document;
pub mod memory;
pub mod repositories;

pub use datastore::{Datastore, Persistence};
pub use document::{Document, DocumentStore, FieldOp, Query, SortDirection, StoreError};
pub use memory::MemoryStore;
pub use repositories::{BillRepository, ReportRepository, TariffRepository, UserRepository};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockBillRepository, MockReportRepository, MockTariffRepository, MockUserRepository,
};
