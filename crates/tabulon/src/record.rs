//! Ordered records.
//!
//! A [`Record`] maps field names to [`Value`]s and remembers the order its
//! fields were declared in. Field order is load-bearing: projection keeps
//! each record's own order, and rendering walks fields in sequence, so the
//! order is stored explicitly instead of relying on a map's iteration order.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// One data row: an ordered mapping from field name to value.
///
/// Inserting an existing field replaces its value in place, like assigning
/// to an object key.
///
/// ```
/// use tabulon::{record, Value};
///
/// let sue = record! { "name" => "Sue", "age" => 25 };
/// assert_eq!(sue.get("age"), Some(&Value::from(25)));
/// assert_eq!(sue.field_names().collect::<Vec<_>>(), ["name", "age"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Record::default()
    }

    /// Creates an empty record with room for `capacity` fields.
    pub fn with_capacity(capacity: usize) -> Self {
        Record {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Sets `field` to `value`, keeping the field's position if it exists.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((field, value)),
        }
    }

    /// Builder-style [`insert`](Record::insert).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Returns the value of `field`, if the record has it.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Returns `true` if the record has `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// `(field, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Keeps only the fields named in `allowed`, in this record's own order.
    pub fn include<S: AsRef<str>>(&self, allowed: &[S]) -> Record {
        self.fields
            .iter()
            .filter(|(name, _)| allowed.iter().any(|a| a.as_ref() == name))
            .cloned()
            .collect()
    }

    /// Rebuilds the record with exactly the fields of `order`, in that order.
    ///
    /// Fields listed in `order` but missing from the record become `Null`.
    pub fn reorder<S: AsRef<str>>(&self, order: &[S]) -> Record {
        let mut out = Record::with_capacity(order.len());
        for field in order {
            let field = field.as_ref();
            out.insert(field, self.get(field).cloned().unwrap_or(Value::Null));
        }
        out
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of field names to scalar values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
        let mut record = Record::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((field, value)) = access.next_entry::<String, Value>()? {
            record.insert(field, value);
        }
        Ok(record)
    }
}

/// Builds a [`Record`] from `field => value` pairs, keeping their order.
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($field:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::Record::new();
        $(record.insert($field, $value);)+
        record
    }};
}
