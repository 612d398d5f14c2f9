//! Document-store client abstraction.
//!
//! The system of record is a document database: named collections of
//! JSON documents addressed by an id that lives outside the document
//! body. Engines never see this interface directly; they go through the
//! typed repositories, which handle (de)serialization and id plumbing.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// A stored document body. The id is not part of the body.
pub type Document = Map<String, Value>;

/// Low-level storage failures
#[derive(Error, Debug)]
pub enum StoreError {
    /// Partial update targeted a document that does not exist
    #[error("document not found")]
    DocumentMissing,

    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("backend failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Single-field change applied by a partial update.
///
/// Removing a field is a distinct operation from setting it to null;
/// an absent field and a null field are different document states.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOp {
    Set { field: String, value: Value },
    Remove { field: String },
}

impl FieldOp {
    pub fn set(field: impl Into<String>, value: Value) -> Self {
        FieldOp::Set {
            field: field.into(),
            value,
        }
    }

    pub fn remove(field: impl Into<String>) -> Self {
        FieldOp::Remove {
            field: field.into(),
        }
    }
}

/// Sort order for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Collection query: conjunctive equality filters plus an optional
/// single-field ordering.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filters: Vec<(String, Value)>,
    pub order_by: Option<(String, SortDirection)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`; multiple filters are ANDed together
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn order_asc(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some((field.into(), SortDirection::Ascending));
        self
    }

    pub fn order_desc(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some((field.into(), SortDirection::Descending));
        self
    }
}

/// Backend-agnostic document store client.
///
/// Writes are atomic per document; there are no multi-document
/// transactions. Reading or querying a collection that was never written
/// yields nothing rather than an error.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a single document by id
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Insert a document under a freshly generated id, returning the id
    async fn insert(&self, collection: &str, document: Document) -> StoreResult<String>;

    /// Write a full document under a caller-chosen id (upsert)
    async fn set(&self, collection: &str, id: &str, document: Document) -> StoreResult<()>;

    /// Apply field-level changes to an existing document.
    ///
    /// Fails with [`StoreError::DocumentMissing`] when the target does
    /// not exist; a partial update never creates a document.
    async fn apply(&self, collection: &str, id: &str, ops: Vec<FieldOp>) -> StoreResult<()>;

    /// Fetch all documents matching the query, with their ids
    async fn query(&self, collection: &str, query: Query) -> StoreResult<Vec<(String, Document)>>;
}
