//! Metadata record model and single-field updates.

use crate::error::Result;
use crate::schema::{canonical_key_order, validate_field};
use crate::value::{renormalize, FieldValue, RawContent};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A metadata record: field names mapped to values, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in their current order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Set a field, overwriting any previous value. Returns the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Normalize every stored value in place.
    pub fn renormalize(&mut self) {
        for value in self.fields.values_mut() {
            *value = renormalize(value);
        }
    }

    /// Rebuild the record with recognized fields first, in canonical order,
    /// followed by the others in their original relative order.
    #[must_use]
    pub fn reordered(mut self) -> Self {
        let order: Vec<String> = canonical_key_order(self.keys())
            .into_iter()
            .map(String::from)
            .collect();

        let mut fields = Map::with_capacity(self.fields.len());
        for key in order {
            if let Some(value) = self.fields.remove(&key) {
                fields.insert(key, value);
            }
        }
        Self { fields }
    }

    /// Apply a field update: assign, renormalize and reorder.
    ///
    /// Returns the value the field held before the update.
    pub fn apply(&mut self, update: &FieldUpdate) -> Option<Value> {
        let previous = self.insert(update.field.clone(), update.value.clone());
        self.renormalize();
        *self = std::mem::take(self).reordered();
        previous
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<Record> for Map<String, Value> {
    fn from(record: Record) -> Self {
        record.fields
    }
}

/// A validated single-field update.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    /// Canonical field name.
    pub field: String,
    /// Normalized value to store.
    pub value: FieldValue,
}

impl FieldUpdate {
    /// Create an update from an already normalized value.
    ///
    /// # Errors
    /// Returns `CoreError::UnsupportedField` if the field is not recognized.
    pub fn new(field: impl Into<String>, value: FieldValue) -> Result<Self> {
        let field = field.into();
        validate_field(&field)?;
        Ok(Self { field, value })
    }

    /// Create an update by normalizing raw content.
    ///
    /// # Errors
    /// Returns `CoreError::UnsupportedField` if the field is not recognized.
    pub fn parse(field: impl Into<String>, content: &RawContent) -> Result<Self> {
        Self::new(field, content.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::value::Scalar;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_reordered_puts_canonical_fields_first() {
        let rec = record(json!({
            "custom": 1,
            "Tag": ["x"],
            "extra": "e",
            "Identifier": "eos0abc",
            "Title": "Model"
        }))
        .reordered();

        assert_eq!(
            rec.keys().collect::<Vec<_>>(),
            vec!["Identifier", "Title", "Tag", "custom", "extra"]
        );
    }

    #[test]
    fn test_apply_inserts_new_field_in_canonical_slot() {
        let mut rec = record(json!({"Title": "Foo", "Identifier": "eos1"}));
        let update = FieldUpdate::parse("Status", &RawContent::Text("Ready".into())).unwrap();

        let previous = rec.apply(&update);

        assert!(previous.is_none());
        assert_eq!(rec.keys().collect::<Vec<_>>(), vec!["Identifier", "Status", "Title"]);
        assert_eq!(rec.get("Status"), Some(&json!("Ready")));
    }

    #[test]
    fn test_apply_overwrites_without_merge() {
        let mut rec = record(json!({"Tag": ["a", "b"]}));
        let update = FieldUpdate::new("Tag", FieldValue::List(vec![Scalar::Text("c".into())])).unwrap();

        let previous = rec.apply(&update);

        assert_eq!(previous, Some(json!(["a", "b"])));
        assert_eq!(rec.get("Tag"), Some(&json!(["c"])));
    }

    #[test]
    fn test_apply_renormalizes_existing_fields() {
        let mut rec = record(json!({"Publication Year": "2021", "Title": "'Foo'"}));
        let update = FieldUpdate::parse("Status", &RawContent::Text("Ready".into())).unwrap();

        rec.apply(&update);

        assert_eq!(rec.get("Publication Year"), Some(&json!(2021)));
        assert_eq!(rec.get("Title"), Some(&json!("Foo")));
    }

    #[test]
    fn test_apply_twice_is_idempotent() {
        let mut rec = record(json!({"zz": "keep", "Title": "Foo"}));
        let update = FieldUpdate::parse("Tag", &RawContent::Text("[bar, baz]".into())).unwrap();

        rec.apply(&update);
        let once = rec.clone();
        rec.apply(&update);

        assert_eq!(rec, once);
        assert_eq!(
            serde_json::to_string(&rec).unwrap(),
            serde_json::to_string(&once).unwrap()
        );
    }

    #[test]
    fn test_unsupported_field_is_rejected() {
        let err = FieldUpdate::parse("NotAField", &RawContent::Text("x".into())).unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedField(_)));
    }
}
