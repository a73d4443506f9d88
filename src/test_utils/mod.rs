//! Helpers for tests and benchmarks: a scripted driver and a result-set builder.

use crate::results::ResultSet;
use crate::types::RowValues;

mod memory_driver;

pub use memory_driver::{CallKind, DriverCall, DriverLog, MemoryDriver};

/// Build a result set for scripting a driver. Panics if a row's width is off.
#[must_use]
pub fn result_set(column_names: &[&str], rows: Vec<Vec<RowValues>>) -> ResultSet {
    ResultSet::from_rows(column_names.iter().copied(), rows)
        .expect("test rows must match the column count")
}
