use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::driver::Driver;
use crate::error::SqlRowMapperError;
use crate::results::ResultSet;
use crate::types::QueryParams;

use super::config::SqliteOptions;
use super::params::Params;
use super::query::build_result_set;

pub(crate) type SharedSqliteConnection = Arc<Mutex<rusqlite::Connection>>;

/// rusqlite-backed [`Driver`].
///
/// Blocking calls run on the caller's thread. Async calls move the work onto
/// `tokio::task::spawn_blocking`, so they need a Tokio runtime.
pub struct SqliteDriver {
    conn: Option<SharedSqliteConnection>,
    options: SqliteOptions,
}

impl SqliteDriver {
    /// Open the database described by `options` and apply its pragmas.
    ///
    /// # Errors
    ///
    /// Returns `SqlRowMapperError::SqliteError` if the file cannot be opened or a pragma
    /// fails.
    pub fn with_options(options: SqliteOptions) -> Result<Self, SqlRowMapperError> {
        debug!(db_path = %options.db_path, "opening sqlite database");
        let conn = rusqlite::Connection::open(&options.db_path)?;
        conn.busy_timeout(options.busy_timeout())?;
        if options.foreign_keys {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        }
        if options.wal && !options.is_memory() {
            debug!(db_path = %options.db_path, "enabling WAL journal");
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        Ok(Self {
            conn: Some(Arc::new(Mutex::new(conn))),
            options,
        })
    }

    fn handle(&self) -> Result<&SharedSqliteConnection, SqlRowMapperError> {
        self.conn.as_ref().ok_or_else(|| {
            SqlRowMapperError::ConnectionError("SQLite connection already closed".to_string())
        })
    }
}

fn lock_connection(conn: &SharedSqliteConnection) -> MutexGuard<'_, rusqlite::Connection> {
    // a panic in another holder leaves the connection itself usable
    conn.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn run_blocking<F, R>(conn: SharedSqliteConnection, func: F) -> Result<R, SqlRowMapperError>
where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R, SqlRowMapperError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = lock_connection(&conn);
        func(&mut guard)
    })
    .await
    .map_err(|e| {
        SqlRowMapperError::ExecutionError(format!("sqlite spawn_blocking join error: {e}"))
    })?
}

fn run_non_query(
    conn: &rusqlite::Connection,
    query: &str,
    params: &Params,
) -> Result<(), SqlRowMapperError> {
    let mut stmt = conn.prepare(query)?;
    stmt.execute(params.as_named().as_slice())?;
    Ok(())
}

fn run_rows(
    conn: &rusqlite::Connection,
    query: &str,
    params: &Params,
) -> Result<ResultSet, SqlRowMapperError> {
    let mut stmt = conn.prepare(query)?;
    build_result_set(&mut stmt, params)
}

#[async_trait]
impl Driver for SqliteDriver {
    fn open(descriptor: &str) -> Result<Self, SqlRowMapperError> {
        SqliteDriver::with_options(SqliteOptions::from_descriptor(descriptor)?)
    }

    fn close(&mut self) -> Result<(), SqlRowMapperError> {
        let Some(shared) = self.conn.take() else {
            return Ok(());
        };
        match Arc::try_unwrap(shared) {
            Ok(mutex) => {
                let conn = mutex.into_inner().unwrap_or_else(PoisonError::into_inner);
                debug!(db_path = %self.options.db_path, "closing sqlite database");
                conn.close()
                    .map_err(|(_, err)| SqlRowMapperError::SqliteError(err))
            }
            // a blocking task still holds a handle; the last one to drop closes the database
            Err(_) => Ok(()),
        }
    }

    fn execute_non_query(
        &mut self,
        query: &str,
        params: &QueryParams,
    ) -> Result<(), SqlRowMapperError> {
        let params = Params::convert(params);
        let guard = lock_connection(self.handle()?);
        run_non_query(&guard, query, &params)
    }

    fn execute_rows(
        &mut self,
        query: &str,
        params: &QueryParams,
    ) -> Result<ResultSet, SqlRowMapperError> {
        let params = Params::convert(params);
        let guard = lock_connection(self.handle()?);
        run_rows(&guard, query, &params)
    }

    async fn execute_non_query_async(
        &mut self,
        query: &str,
        params: &QueryParams,
    ) -> Result<(), SqlRowMapperError> {
        let conn = Arc::clone(self.handle()?);
        let sql_owned = query.to_owned();
        let params_owned = Params::convert(params);
        run_blocking(conn, move |guard| run_non_query(guard, &sql_owned, &params_owned)).await
    }

    async fn execute_rows_async(
        &mut self,
        query: &str,
        params: &QueryParams,
    ) -> Result<ResultSet, SqlRowMapperError> {
        let conn = Arc::clone(self.handle()?);
        let sql_owned = query.to_owned();
        let params_owned = Params::convert(params);
        run_blocking(conn, move |guard| run_rows(guard, &sql_owned, &params_owned)).await
    }
}
