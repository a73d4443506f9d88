//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and traits
//! to make it easier to get started with the library.

pub use crate::connection::Connection;
pub use crate::conversion::{FromDbRow, FromRowValue};
pub use crate::driver::Driver;
pub use crate::error::SqlRowMapperError;
pub use crate::results::{DbRecord, DbRow, ResultSet};
pub use crate::types::{QueryParams, RowValues};

#[cfg(feature = "sqlite")]
pub use crate::sqlite::{SqliteDriver, SqliteOptions};
