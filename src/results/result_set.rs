use std::collections::HashMap;
use std::sync::Arc;

use super::row::{DbRow, build_column_index};
use crate::error::SqlRowMapperError;
use crate::types::RowValues;

/// A result set from a database query
///
/// Rows are kept in the order the driver produced them. Mapping consumes the set, so a
/// result set is read at most once.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<DbRow>,
    /// Column names shared by all rows (to avoid duplicating in each row)
    column_names: Option<Arc<Vec<String>>>,
    column_index: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    /// Create a new result set with a known capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            column_names: None,
            column_index: None,
        }
    }

    /// Build a result set from column names and row values in one go.
    ///
    /// # Errors
    ///
    /// Returns `SqlRowMapperError::ExecutionError` if a row's width differs from the number
    /// of columns.
    pub fn from_rows<S: Into<String>>(
        column_names: impl IntoIterator<Item = S>,
        rows: Vec<Vec<RowValues>>,
    ) -> Result<ResultSet, SqlRowMapperError> {
        let mut result_set = ResultSet::with_capacity(rows.len());
        result_set.set_column_names(Arc::new(column_names.into_iter().map(Into::into).collect()));
        for row in rows {
            result_set.add_row_values(row)?;
        }
        Ok(result_set)
    }

    /// Set the column names for this result set (to be shared by all rows)
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index = Some(build_column_index(&column_names));
        self.column_names = Some(column_names);
    }

    /// Add a row to the result set
    ///
    /// # Errors
    ///
    /// Returns `SqlRowMapperError::ExecutionError` if no column names were set or the row
    /// width does not match them.
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) -> Result<(), SqlRowMapperError> {
        let (Some(column_names), Some(column_index)) = (&self.column_names, &self.column_index)
        else {
            return Err(SqlRowMapperError::ExecutionError(
                "No column names available".to_string(),
            ));
        };
        if row_values.len() != column_names.len() {
            return Err(SqlRowMapperError::ExecutionError(format!(
                "Row has {} values but the result set has {} columns",
                row_values.len(),
                column_names.len()
            )));
        }

        self.results.push(DbRow::with_index(
            Arc::clone(column_names),
            row_values,
            Arc::clone(column_index),
        ));
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl IntoIterator for ResultSet {
    type Item = DbRow;
    type IntoIter = std::vec::IntoIter<DbRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_share_column_names() {
        let rs = ResultSet::from_rows(
            ["a", "b"],
            vec![
                vec![RowValues::Int(1), RowValues::Null],
                vec![RowValues::Int(2), RowValues::Bool(true)],
            ],
        )
        .unwrap();

        assert_eq!(rs.len(), 2);
        assert!(std::ptr::eq(
            rs.results[0].column_names(),
            rs.results[1].column_names()
        ));
        assert_eq!(rs.results[1].get("b"), Some(&RowValues::Bool(true)));
    }

    #[test]
    fn width_mismatch_is_rejected() {
        let err = ResultSet::from_rows(["a"], vec![vec![RowValues::Int(1), RowValues::Int(2)]])
            .unwrap_err();
        assert!(matches!(err, SqlRowMapperError::ExecutionError(_)));
    }

    #[test]
    fn add_row_values_requires_columns() {
        let mut rs = ResultSet::with_capacity(1);
        assert!(rs.add_row_values(vec![RowValues::Null]).is_err());
    }

    #[test]
    fn empty_set_has_no_rows() {
        let rs = ResultSet::from_rows(Vec::<String>::new(), Vec::new()).unwrap();
        assert!(rs.is_empty());
        assert_eq!(rs.into_iter().count(), 0);
    }
}
