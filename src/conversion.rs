//! Row-to-type conversion.
//!
//! The target shape is picked by the caller's type parameter:
//!
//! - plain scalars (`bool`, integers, floats, `char`, `String`, ...) read the first column;
//!   a stored null becomes the type's zero value,
//! - `Option<scalar>` reads the first column; a stored null becomes `None`,
//! - [`DbRecord`] keeps every column as-is,
//! - tuples of scalars read columns by position,
//! - any user type implementing [`FromDbRow`].
//!
//! A present value that cannot be represented as the requested scalar is a
//! [`SqlRowMapperError::ConversionError`], whether or not the target is nullable.

use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

use crate::error::SqlRowMapperError;
use crate::results::{DbRecord, DbRow};
use crate::types::RowValues;

mod macros;
mod scalar;

use macros::{impl_scalar_row, impl_tuple_row};

/// Conversion of a single stored value into a Rust value.
pub trait FromRowValue: Sized {
    /// Result for a null or absent value.
    fn from_null() -> Self;

    /// Result for a present value, `None` when it cannot be represented.
    fn from_present(value: &RowValues) -> Option<Self>;

    /// Name of the requested type, used in error messages.
    fn target_name() -> &'static str;
}

/// Conversion of a whole row into one result element.
///
/// Implement this for your own structs to map rows by column name:
/// ```rust
/// use sql_row_mapper::prelude::*;
///
/// struct User {
///     id: i64,
///     nick: Option<String>,
/// }
///
/// impl FromDbRow for User {
///     fn from_db_row(row: &DbRow) -> Result<Self, SqlRowMapperError> {
///         Ok(User {
///             id: row.try_get("id")?,
///             nick: row.try_get("nick")?,
///         })
///     }
/// }
/// ```
pub trait FromDbRow: Sized {
    /// # Errors
    ///
    /// Returns `SqlRowMapperError` if a column cannot be converted.
    fn from_db_row(row: &DbRow) -> Result<Self, SqlRowMapperError>;
}

/// Convert one stored value; `None` stands for an absent column and is treated like null.
///
/// # Errors
///
/// Returns `SqlRowMapperError::ConversionError` if the value is present but cannot be
/// represented as `T`.
pub fn convert_value<T: FromRowValue>(
    column: &str,
    value: Option<&RowValues>,
) -> Result<T, SqlRowMapperError> {
    match value {
        None | Some(RowValues::Null) => Ok(T::from_null()),
        Some(present) => {
            T::from_present(present).ok_or_else(|| SqlRowMapperError::ConversionError {
                column: column.to_owned(),
                target: T::target_name(),
                found: present.kind_name(),
            })
        }
    }
}

fn from_column_at<T: FromRowValue>(row: &DbRow, idx: usize) -> Result<T, SqlRowMapperError> {
    let column = row.column_names().get(idx).map_or("", String::as_str);
    convert_value(column, row.get_by_index(idx))
}

fn from_first_column<T: FromRowValue>(row: &DbRow) -> Result<T, SqlRowMapperError> {
    from_column_at(row, 0)
}

impl_scalar_row!(
    bool,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    char,
    String,
    Vec<u8>,
    NaiveDateTime,
    JsonValue,
    RowValues,
);

impl_tuple_row!(A: 0, B: 1);
impl_tuple_row!(A: 0, B: 1, C: 2);
impl_tuple_row!(A: 0, B: 1, C: 2, D: 3);

impl FromDbRow for DbRecord {
    fn from_db_row(row: &DbRow) -> Result<Self, SqlRowMapperError> {
        Ok(DbRecord::from(row))
    }
}
