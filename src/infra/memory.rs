//! In-memory document store.
//!
//! Backend used by the development server and the test suite. It keeps
//! the same observable contract as a hosted document database: atomic
//! per-document writes, equality filters, single-field ordering, and
//! empty results for collections that were never written.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::document::{Document, DocumentStore, FieldOp, Query, SortDirection, StoreError, StoreResult};

/// Thread-safe in-memory collection map
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a fixture of the shape `{ "<collection>": [ { "id": ..., ... } ] }`.
    ///
    /// Documents carrying an `"id"` key keep it as their document id;
    /// the key is stripped from the stored body either way. Documents
    /// without one get a generated id.
    pub async fn seed(&self, fixture: Value) -> StoreResult<()> {
        let Value::Object(collections) = fixture else {
            return Err(StoreError::Backend(
                "seed fixture must be a JSON object of collections".into(),
            ));
        };

        let mut guard = self.collections.write().await;
        for (name, documents) in collections {
            let Value::Array(documents) = documents else {
                return Err(StoreError::Backend(format!(
                    "collection {name} in seed fixture must be an array"
                )));
            };

            let entry = guard.entry(name).or_default();
            for document in documents {
                let Value::Object(mut body) = document else {
                    return Err(StoreError::Backend(
                        "seed documents must be JSON objects".into(),
                    ));
                };
                let id = match body.remove("id") {
                    Some(Value::String(id)) => id,
                    Some(other) => {
                        return Err(StoreError::Backend(format!(
                            "seed document id must be a string, got {other}"
                        )))
                    }
                    None => Uuid::new_v4().to_string(),
                };
                entry.insert(id, body);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn insert(&self, collection: &str, document: Document) -> StoreResult<String> {
        let id = Uuid::new_v4().to_string();
        let mut guard = self.collections.write().await;
        guard
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), document);
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> StoreResult<()> {
        let mut guard = self.collections.write().await;
        guard
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn apply(&self, collection: &str, id: &str, ops: Vec<FieldOp>) -> StoreResult<()> {
        let mut guard = self.collections.write().await;
        let document = guard
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or(StoreError::DocumentMissing)?;

        for op in ops {
            match op {
                FieldOp::Set { field, value } => {
                    document.insert(field, value);
                }
                FieldOp::Remove { field } => {
                    document.remove(&field);
                }
            }
        }
        Ok(())
    }

    async fn query(&self, collection: &str, query: Query) -> StoreResult<Vec<(String, Document)>> {
        let guard = self.collections.read().await;
        let Some(docs) = guard.get(collection) else {
            return Ok(Vec::new());
        };

        let mut rows: Vec<(String, Document)> = docs
            .iter()
            .filter(|(_, doc)| {
                query
                    .filters
                    .iter()
                    .all(|(field, expected)| doc.get(field) == Some(expected))
            })
            .map(|(id, doc)| (id.clone(), doc.clone()))
            .collect();

        if let Some((field, direction)) = &query.order_by {
            rows.sort_by(|(_, a), (_, b)| {
                let ordering = compare_values(
                    a.get(field).unwrap_or(&Value::Null),
                    b.get(field).unwrap_or(&Value::Null),
                );
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        Ok(rows)
    }
}

/// Total order over JSON values, by type rank then within-type value.
/// RFC 3339 timestamps are fixed-width, so their lexicographic string
/// order matches chronological order.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
