use rusqlite::ToSql;
use rusqlite::types::Value;

use crate::types::{QueryParams, RowValues};

/// Convert a single `RowValues` to a rusqlite `Value`.
#[must_use]
pub fn row_value_to_sqlite_value(value: &RowValues) -> Value {
    match value {
        RowValues::Int(i) => Value::Integer(*i),
        RowValues::Float(f) => Value::Real(*f),
        RowValues::Text(s) => Value::Text(s.clone()),
        RowValues::Bool(b) => Value::Integer(i64::from(*b)),
        RowValues::Timestamp(dt) => Value::Text(dt.format("%F %T%.f").to_string()),
        RowValues::Null => Value::Null,
        RowValues::JSON(jval) => Value::Text(jval.to_string()),
        RowValues::Blob(bytes) => Value::Blob(bytes.clone()),
    }
}

/// `SQLite` wants the placeholder prefix as part of the name.
fn placeholder_name(name: &str) -> String {
    if name.starts_with([':', '@', '$', '?']) {
        name.to_owned()
    } else {
        format!(":{name}")
    }
}

/// Owned named parameters, ready to be bound to a statement.
#[derive(Debug, Clone, Default)]
pub struct Params(pub Vec<(String, Value)>);

impl Params {
    #[must_use]
    pub fn convert(params: &QueryParams) -> Self {
        Params(
            params
                .iter()
                .map(|(name, value)| (placeholder_name(name), row_value_to_sqlite_value(value)))
                .collect(),
        )
    }

    /// Borrowed view in the shape rusqlite binds as named parameters.
    #[must_use]
    pub fn as_named(&self) -> Vec<(&str, &dyn ToSql)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_get_a_prefix_when_missing() {
        let params = QueryParams::new()
            .with_value("id", 1)
            .with_value(":name", "x")
            .with_value("?1", true)
            .with_value("@at", RowValues::Null);
        let converted = Params::convert(&params);
        let names: Vec<&str> = converted.0.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec![":id", ":name", "?1", "@at"]);
        assert_eq!(converted.0[2].1, Value::Integer(1));
        assert_eq!(converted.0[3].1, Value::Null);
    }
}
