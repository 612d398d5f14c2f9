//! Repository layer - Data access abstraction
//!
//! Each collection gets a trait describing the operations the engines
//! need, plus a concrete implementation over the document store. The
//! shared glue here moves entities in and out of document form, keeping
//! the id outside the stored body.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::document::{Document, StoreError, StoreResult};

mod bills;
mod reports;
mod tariffs;
mod users;

pub use bills::{BillCollection, BillRepository};
pub use reports::{ReportCollection, ReportRepository};
pub use tariffs::{TariffCollection, TariffRepository};
pub use users::{UserCollection, UserRepository};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use bills::MockBillRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use reports::MockReportRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use tariffs::MockTariffRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use users::MockUserRepository;

/// Serialize an entity into a document body, dropping its id field
pub(crate) fn to_document<T: Serialize>(entity: &T) -> StoreResult<Document> {
    match serde_json::to_value(entity)? {
        Value::Object(mut body) => {
            body.remove("id");
            Ok(body)
        }
        _ => Err(StoreError::Backend(
            "entity did not serialize to an object".into(),
        )),
    }
}

/// Rebuild an entity from a document body and its external id
pub(crate) fn from_document<T: DeserializeOwned>(id: &str, mut body: Document) -> StoreResult<T> {
    body.insert("id".to_string(), Value::String(id.to_string()));
    Ok(serde_json::from_value(Value::Object(body))?)
}

/// Serialize a single field value for a partial update
pub(crate) fn to_value<T: Serialize>(value: &T) -> StoreResult<Value> {
    Ok(serde_json::to_value(value)?)
}
