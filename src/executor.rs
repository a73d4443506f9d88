//! The part of query execution shared by the blocking and the async entry points.
//!
//! Both paths call [`validate_query`] before touching the driver and hand the driver's
//! [`ResultSet`] to [`collect_rows`] or [`first_row`]; only the driver call itself differs.

use crate::conversion::FromDbRow;
use crate::error::SqlRowMapperError;
use crate::results::ResultSet;

/// Reject query text that is empty or whitespace-only.
///
/// # Errors
///
/// Returns `SqlRowMapperError::InvalidArgument` for blank text.
pub fn validate_query(query: &str) -> Result<(), SqlRowMapperError> {
    if query.trim().is_empty() {
        return Err(SqlRowMapperError::InvalidArgument(
            "query text must contain at least one non-whitespace character".to_string(),
        ));
    }
    Ok(())
}

/// Map every row, keeping result-set order. The first failing row fails the whole call.
///
/// # Errors
///
/// Returns the first `SqlRowMapperError` raised by `T::from_db_row`.
pub fn collect_rows<T: FromDbRow>(result_set: ResultSet) -> Result<Vec<T>, SqlRowMapperError> {
    let mut mapped = Vec::with_capacity(result_set.len());
    for row in result_set {
        mapped.push(T::from_db_row(&row)?);
    }
    Ok(mapped)
}

/// Map the first row only; later rows are never looked at.
///
/// # Errors
///
/// Returns the `SqlRowMapperError` raised by `T::from_db_row` for the first row.
pub fn first_row<T: FromDbRow>(result_set: ResultSet) -> Result<Option<T>, SqlRowMapperError> {
    result_set
        .into_iter()
        .next()
        .map(|row| T::from_db_row(&row))
        .transpose()
}
