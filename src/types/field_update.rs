//! Three-way patch values.
//!
//! A partial update must be able to say three different things about a
//! field: leave it as it is, set it to a value, or remove it from the
//! document entirely. A plain `Option` collapses the first and last case,
//! so patches carry this type instead.

use serde::{Deserialize, Deserializer};

/// Patch instruction for a single optional field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Field is not part of this patch
    #[default]
    Unchanged,
    /// Field takes the given value
    Set(T),
    /// Field is removed from the document
    Clear,
}

impl<T> FieldUpdate<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, FieldUpdate::Unchanged)
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Builds a patch value from the wire encoding: an absent JSON key is
    /// `Unchanged`, an explicit `null` is `Clear`, anything else is `Set`.
    pub fn from_double_option(value: Option<Option<T>>) -> Self {
        match value {
            None => FieldUpdate::Unchanged,
            Some(None) => FieldUpdate::Clear,
            Some(Some(inner)) => FieldUpdate::Set(inner),
        }
    }
}

/// Deserializer that keeps "key absent" and "key null" distinguishable.
///
/// Use together with `#[serde(default)]`: serde only calls this function
/// when the key is present, so absence stays `None` while a JSON `null`
/// becomes `Some(None)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        assignee_id: Option<Option<String>>,
    }

    #[test]
    fn absent_key_is_unchanged() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(
            FieldUpdate::from_double_option(patch.assignee_id),
            FieldUpdate::<String>::Unchanged
        );
    }

    #[test]
    fn null_key_is_clear() {
        let patch: Patch = serde_json::from_str(r#"{"assignee_id": null}"#).unwrap();
        assert_eq!(
            FieldUpdate::from_double_option(patch.assignee_id),
            FieldUpdate::<String>::Clear
        );
    }

    #[test]
    fn value_key_is_set() {
        let patch: Patch = serde_json::from_str(r#"{"assignee_id": "officer-1"}"#).unwrap();
        assert_eq!(
            FieldUpdate::from_double_option(patch.assignee_id),
            FieldUpdate::Set("officer-1".to_string())
        );
    }
}
