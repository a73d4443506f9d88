use std::collections::HashSet;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value as JsonValue};

use super::row::DbRow;
use crate::types::RowValues;

/// Free-form record: every column of a row as a named field, values left exactly as the
/// driver returned them.
///
/// ```rust
/// use std::sync::Arc;
/// use sql_row_mapper::prelude::*;
///
/// let row = DbRow::new(
///     Arc::new(vec!["id".into(), "nick".into()]),
///     vec![RowValues::Int(3), RowValues::Null],
/// );
/// let record = DbRecord::from(&row);
/// assert_eq!(record.get("id"), Some(&RowValues::Int(3)));
/// assert_eq!(record.get("nick"), Some(&RowValues::Null));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DbRecord {
    fields: Vec<(String, RowValues)>,
}

impl DbRecord {
    /// Value of the named field. Duplicate names resolve to the first field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RowValues> {
        self.fields
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValues)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Take the value out of the named field, leaving `Null` behind.
    pub fn take(&mut self, name: &str) -> Option<RowValues> {
        self.fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| std::mem::replace(v, RowValues::Null))
    }

    /// JSON object with one key per field.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let mut map = Map::with_capacity(self.fields.len());
        for (name, value) in &self.fields {
            map.entry(name.clone()).or_insert_with(|| value.to_json());
        }
        JsonValue::Object(map)
    }
}

impl From<&DbRow> for DbRecord {
    fn from(row: &DbRow) -> Self {
        DbRecord {
            fields: row
                .iter()
                .map(|(name, value)| (name.to_owned(), value.clone()))
                .collect(),
        }
    }
}

impl From<DbRow> for DbRecord {
    fn from(row: DbRow) -> Self {
        let (column_names, values) = row.into_parts();
        DbRecord {
            fields: column_names.iter().cloned().zip(values).collect(),
        }
    }
}

impl Serialize for DbRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // same first-wins rule as `get` and `to_json`
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.fields.len());
        let mut unique = Vec::with_capacity(self.fields.len());
        for (name, value) in &self.fields {
            if seen.insert(name.as_str()) {
                unique.push((name, value));
            }
        }
        let mut map = serializer.serialize_map(Some(unique.len()))?;
        for (name, value) in unique {
            map.serialize_entry(name, &value.to_json())?;
        }
        map.end()
    }
}
