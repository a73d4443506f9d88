use std::collections::HashMap;
use std::sync::Arc;

use crate::conversion::{FromRowValue, convert_value};
use crate::error::SqlRowMapperError;
use crate::types::RowValues;

/// A row from a database query result
///
/// Column names are shared with every other row of the same result set; values are in
/// the order the driver returned the columns.
#[derive(Debug, Clone)]
pub struct DbRow {
    column_names: Arc<Vec<String>>,
    values: Vec<RowValues>,
    // built from `column_names`; the two never change independently
    column_index_cache: Arc<HashMap<String, usize>>,
}

/// Build the name to position lookup. Duplicate names resolve to the first occurrence.
pub(crate) fn build_column_index(column_names: &[String]) -> Arc<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(column_names.len());
    for (i, name) in column_names.iter().enumerate() {
        index.entry(name.clone()).or_insert(i);
    }
    Arc::new(index)
}

impl DbRow {
    /// Create a new database row
    ///
    /// # Arguments
    ///
    /// * `column_names` - The column names
    /// * `values` - The values for this row
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<RowValues>) -> Self {
        let column_index_cache = build_column_index(&column_names);
        Self::with_index(column_names, values, column_index_cache)
    }

    /// Row sharing a lookup already built for `column_names`.
    pub(crate) fn with_index(
        column_names: Arc<Vec<String>>,
        values: Vec<RowValues>,
        column_index_cache: Arc<HashMap<String, usize>>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index_cache,
        }
    }

    /// The column names, shared across all rows of a result set.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// The values, in driver column order.
    #[must_use]
    pub fn values(&self) -> &[RowValues] {
        &self.values
    }

    pub(crate) fn into_parts(self) -> (Arc<Vec<String>>, Vec<RowValues>) {
        (self.column_names, self.values)
    }

    /// Get the index of a column by name
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index_cache.get(column_name).copied()
    }

    /// Get a value from the row by column name
    ///
    /// # Returns
    ///
    /// The value at the column, or None if the column wasn't found
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get a value from the row by column index
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.values.get(index)
    }

    /// Name and value of the first column, if the row has any column at all.
    #[must_use]
    pub fn first(&self) -> Option<(&str, &RowValues)> {
        self.column_names
            .first()
            .zip(self.values.first())
            .map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(column name, value)` pairs in driver order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValues)> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Convert the named column with the same rules used for scalar rows.
    ///
    /// `T = Option<U>` yields `None` for a stored null, a plain scalar yields its zero value.
    ///
    /// # Errors
    ///
    /// `MissingColumn` if the row has no such column, `ConversionError` if the stored value
    /// cannot be represented as `T`.
    pub fn try_get<T: FromRowValue>(&self, column_name: &str) -> Result<T, SqlRowMapperError> {
        let value = self
            .get(column_name)
            .ok_or_else(|| SqlRowMapperError::MissingColumn(column_name.to_owned()))?;
        convert_value(column_name, Some(value))
    }
}
