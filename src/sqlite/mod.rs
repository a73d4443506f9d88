// SQLite module - rusqlite-backed `Driver`
//
// - config: descriptor handling and open options
// - params: binding `QueryParams` as SQLite named parameters
// - query: result extraction and building
// - driver: the `Driver` implementation itself

pub mod config;
mod driver;
pub mod params;
pub mod query;

// Re-export the public API
pub use config::{SqliteOptions, SqliteOptionsBuilder};
pub use driver::SqliteDriver;
pub use query::build_result_set;
