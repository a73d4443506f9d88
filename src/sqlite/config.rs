use std::time::Duration;

use serde::Deserialize;

use crate::connection::Connection;
use crate::error::SqlRowMapperError;

use super::driver::SqliteDriver;

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Options for opening a `SQLite` database.
///
/// Can be deserialized from configuration; every field but `db_path` has a default:
/// ```rust
/// use sql_row_mapper::sqlite::SqliteOptions;
///
/// let opts: SqliteOptions =
///     serde_json::from_str(r#"{ "db_path": "app.db", "wal": true }"#).unwrap();
/// assert_eq!(opts.busy_timeout_ms, 5000);
/// assert!(opts.foreign_keys);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SqliteOptions {
    /// Filesystem path, `:memory:`, or a `file:` URI.
    pub db_path: String,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    #[serde(default = "default_true")]
    pub foreign_keys: bool,
    /// Switch file-backed databases to WAL journaling. Ignored for in-memory databases.
    #[serde(default)]
    pub wal: bool,
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

fn default_true() -> bool {
    true
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            db_path,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            foreign_keys: true,
            wal: false,
        }
    }

    /// Default options for a connection descriptor.
    ///
    /// # Errors
    ///
    /// Returns `SqlRowMapperError::ConfigError` if the descriptor is blank.
    pub fn from_descriptor(descriptor: &str) -> Result<Self, SqlRowMapperError> {
        let db_path = descriptor.trim();
        if db_path.is_empty() {
            return Err(SqlRowMapperError::ConfigError(
                "SQLite descriptor must name a database path".to_string(),
            ));
        }
        Ok(Self::new(db_path.to_owned()))
    }

    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.db_path == ":memory:" || self.db_path.contains("mode=memory")
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn busy_timeout_ms(mut self, busy_timeout_ms: u64) -> Self {
        self.opts.busy_timeout_ms = busy_timeout_ms;
        self
    }

    #[must_use]
    pub fn foreign_keys(mut self, foreign_keys: bool) -> Self {
        self.opts.foreign_keys = foreign_keys;
        self
    }

    #[must_use]
    pub fn wal(mut self, wal: bool) -> Self {
        self.opts.wal = wal;
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Open a `Connection` backed by these options.
    ///
    /// # Errors
    ///
    /// Returns `SqlRowMapperError` if the database cannot be opened or a pragma fails.
    pub fn build(self) -> Result<Connection<SqliteDriver>, SqlRowMapperError> {
        let opts = self.finish();
        let descriptor = opts.db_path.clone();
        let driver = SqliteDriver::with_options(opts)?;
        Ok(Connection::from_driver(descriptor, driver))
    }
}

impl SqliteOptions {
    #[must_use]
    pub fn builder(db_path: String) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_defaults() {
        let opts = SqliteOptions::from_descriptor(" :memory: ").unwrap();
        assert_eq!(opts.db_path, ":memory:");
        assert!(opts.is_memory());
        assert_eq!(opts.busy_timeout(), Duration::from_secs(5));
        assert!(SqliteOptions::from_descriptor("   ").is_err());
    }

    #[test]
    fn builder_overrides() {
        let opts = SqliteOptions::builder("data.db".into())
            .busy_timeout_ms(250)
            .foreign_keys(false)
            .wal(true)
            .finish();
        assert_eq!(opts.busy_timeout_ms, 250);
        assert!(!opts.foreign_keys);
        assert!(opts.wal);
        assert!(!opts.is_memory());
    }
}
