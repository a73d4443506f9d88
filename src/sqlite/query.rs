use std::sync::Arc;

use rusqlite::Statement;
use rusqlite::types::ValueRef;

use crate::error::SqlRowMapperError;
use crate::results::ResultSet;
use crate::types::RowValues;

use super::params::Params;

/// Extract a `RowValues` from a `SQLite` row.
///
/// # Errors
///
/// Returns `SqlRowMapperError::SqliteError` if the column cannot be read.
pub fn sqlite_extract_value_sync(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<RowValues, SqlRowMapperError> {
    let value = match row.get_ref(idx)? {
        ValueRef::Null => RowValues::Null,
        ValueRef::Integer(i) => RowValues::Int(i),
        ValueRef::Real(f) => RowValues::Float(f),
        // TEXT that is not valid UTF-8 is handed back byte for byte
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => RowValues::Text(text.to_owned()),
            Err(_) => RowValues::Blob(bytes.to_vec()),
        },
        ValueRef::Blob(b) => RowValues::Blob(b.to_vec()),
    };
    Ok(value)
}

/// Run a prepared statement and materialize every row, in the order `SQLite` steps them.
///
/// # Errors
///
/// Returns `SqlRowMapperError::SqliteError` if binding, stepping or reading fails.
pub fn build_result_set(
    stmt: &mut Statement,
    params: &Params,
) -> Result<ResultSet, SqlRowMapperError> {
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(10);
    result_set.set_column_names(Arc::new(column_names));

    let named = params.as_named();
    let mut rows_iter = stmt.query(named.as_slice())?;
    while let Some(row) = rows_iter.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            row_values.push(sqlite_extract_value_sync(row, i)?);
        }
        result_set.add_row_values(row_values)?;
    }

    Ok(result_set)
}
