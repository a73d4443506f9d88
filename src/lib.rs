//! Typed row mapping over a pluggable SQL driver.
//!
//! A [`Connection`] owns one [`Driver`] and turns the rows it returns into scalars,
//! nullable scalars, tuples, open [`DbRecord`]s or any type implementing [`FromDbRow`].
//! Every operation has a blocking and an async form that validate, fetch and convert in
//! exactly the same way.
//!
//! ```rust
//! use sql_row_mapper::prelude::*;
//!
//! # fn demo() -> Result<(), SqlRowMapperError> {
//! let mut conn: Connection<SqliteDriver> = Connection::open(":memory:")?;
//! let none = QueryParams::new();
//!
//! let flag: Option<Option<bool>> = conn.single("SELECT NULL", &none)?;
//! assert_eq!(flag, Some(None));
//!
//! let record: Option<DbRecord> = conn.single("SELECT 1 AS id, 'x' AS name", &none)?;
//! assert_eq!(record.unwrap().get("name"), Some(&RowValues::Text("x".into())));
//! # Ok(()) }
//! # demo().unwrap();
//! ```

pub mod connection;
pub mod conversion;
pub mod driver;
pub mod error;
pub mod executor;
pub mod prelude;
pub mod results;
pub mod types;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use connection::Connection;
pub use conversion::{FromDbRow, FromRowValue};
pub use driver::Driver;
pub use error::SqlRowMapperError;
pub use results::{DbRecord, DbRow, ResultSet};
pub use types::{QueryParams, RowValues};
