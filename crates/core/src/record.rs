//! Ordered field maps
//!
//! A [`Record`] is the object type carried by [`Value::Object`]. Fields keep
//! insertion order so rendered output matches the order the sample data was
//! written in. Lookups are linear; fixture records hold a handful of fields.

use crate::error::{Error, Result};
use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Ordered mapping of field name to [`Value`]
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a field, replacing in place if the key already exists.
    ///
    /// Returns the previous value for the key, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    /// Get a field by name
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Get a field that must be present
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] naming the absent key.
    pub fn require(&self, key: &str) -> Result<&Value> {
        self.get(key).ok_or_else(|| Error::MissingField(key.to_string()))
    }

    /// Whether a field is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// Key order does not participate in equality, same as a JSON object.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}: {}", k, v)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let record = Record::new()
            .with("type", "click")
            .with("data", "button_submit")
            .with("page", "/checkout");
        let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["type", "data", "page"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut record = Record::new().with("a", 1).with("b", 2);
        let previous = record.insert("a", 10);
        assert_eq!(previous, Some(Value::Int(1)));
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("a"), Some(&Value::Int(10)));
        assert_eq!(record.iter().next().map(|(k, _)| k), Some("a"));
    }

    #[test]
    fn test_missing_key() {
        let record = Record::new().with("a", 1);
        assert!(record.get("b").is_none());
        assert!(!record.contains_key("b"));
        assert!(record.contains_key("a"));
    }

    #[test]
    fn test_require_names_missing_field() {
        let record = Record::new().with("data", "x");
        assert!(matches!(
            record.require("type"),
            Err(Error::MissingField(field)) if field == "type"
        ));
        assert_eq!(record.require("data").unwrap(), &Value::from("x"));
    }

    #[test]
    fn test_equality_ignores_order() {
        let r1 = Record::new().with("a", 1).with("b", 2);
        let r2 = Record::new().with("b", 2).with("a", 1);
        assert_eq!(r1, r2);
        assert_ne!(r1, Record::new().with("a", 1));
    }

    #[test]
    fn test_display() {
        let record = Record::new().with("type", "view").with("amount", 99.99);
        assert_eq!(record.to_string(), r#"{"type": "view", "amount": 99.99}"#);
    }

    #[test]
    fn test_serialize_as_ordered_map() {
        let record = Record::new().with("z", 1).with("a", "x");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"z":1,"a":"x"}"#);
    }

    #[test]
    fn test_from_iterator() {
        let record: Record = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("b"), Some(&Value::Int(2)));
    }
}
