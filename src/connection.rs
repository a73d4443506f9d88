use std::fmt;

use tracing::{debug, trace, warn};

use crate::conversion::FromDbRow;
use crate::driver::Driver;
use crate::error::SqlRowMapperError;
use crate::executor::{collect_rows, first_row, validate_query};
use crate::types::QueryParams;

/// Owns one driver connection and maps query results into typed values.
///
/// Every operation checks its query text first and the disposed state second, before the
/// driver is touched; the async operations do so before their first suspension point, so
/// both paths fail the same way for the same input.
///
/// A `Connection` is meant to be used from one task at a time; the `&mut self` receivers
/// enforce that. Dropping it disposes the driver if [`Connection::dispose`] was not called.
///
/// ```rust
/// use sql_row_mapper::prelude::*;
///
/// # fn demo() -> Result<(), SqlRowMapperError> {
/// let mut conn: Connection<SqliteDriver> = Connection::open(":memory:")?;
/// conn.execute("CREATE TABLE t (flag BOOLEAN)", &QueryParams::new())?;
/// conn.execute(
///     "INSERT INTO t (flag) VALUES (:flag)",
///     &QueryParams::new().with_value("flag", true),
/// )?;
///
/// let flags: Vec<bool> = conn.query("SELECT flag FROM t", &QueryParams::new())?;
/// assert_eq!(flags, vec![true]);
/// conn.dispose()?;
/// # Ok(()) }
/// # demo().unwrap();
/// ```
pub struct Connection<D: Driver> {
    descriptor: String,
    driver: Option<D>,
}

impl<D: Driver> Connection<D> {
    /// Open the driver for `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns whatever `D::open` reports.
    pub fn open(descriptor: impl Into<String>) -> Result<Self, SqlRowMapperError> {
        let descriptor = descriptor.into();
        let driver = D::open(&descriptor)?;
        Ok(Self::from_driver(descriptor, driver))
    }

    /// Take ownership of an already opened driver.
    pub fn from_driver(descriptor: impl Into<String>, driver: D) -> Self {
        let descriptor = descriptor.into();
        debug!(descriptor = %descriptor, "connection opened");
        Self {
            descriptor,
            driver: Some(driver),
        }
    }

    #[must_use]
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.driver.is_none()
    }

    /// Close the driver. Later calls are no-ops.
    ///
    /// # Errors
    ///
    /// Returns the driver's close error; the connection is disposed either way.
    pub fn dispose(&mut self) -> Result<(), SqlRowMapperError> {
        match self.driver.take() {
            Some(mut driver) => {
                debug!(descriptor = %self.descriptor, "disposing connection");
                driver.close()
            }
            None => Ok(()),
        }
    }

    fn active_driver(&mut self, query: &str) -> Result<&mut D, SqlRowMapperError> {
        validate_query(query)?;
        self.driver.as_mut().ok_or(SqlRowMapperError::Disposed)
    }

    /// Run a statement that returns no rows.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for blank query text, `Disposed` after [`Connection::dispose`],
    /// otherwise whatever the driver raises.
    pub fn execute(&mut self, query: &str, params: &QueryParams) -> Result<(), SqlRowMapperError> {
        let driver = self.active_driver(query)?;
        trace!(query, "execute");
        driver.execute_non_query(query, params)
    }

    /// Async twin of [`Connection::execute`].
    ///
    /// # Errors
    ///
    /// Same as [`Connection::execute`].
    pub async fn execute_async(
        &mut self,
        query: &str,
        params: &QueryParams,
    ) -> Result<(), SqlRowMapperError> {
        let driver = self.active_driver(query)?;
        trace!(query, "execute_async");
        driver.execute_non_query_async(query, params).await
    }

    /// Run a query and map every row into `T`, in result-set order.
    ///
    /// An empty result set gives an empty `Vec`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument`, `Disposed`, driver errors, or `ConversionError` if any row cannot
    /// be mapped; no partial list is returned.
    pub fn query<T: FromDbRow>(
        &mut self,
        query: &str,
        params: &QueryParams,
    ) -> Result<Vec<T>, SqlRowMapperError> {
        let driver = self.active_driver(query)?;
        let rows = driver.execute_rows(query, params)?;
        trace!(query, rows = rows.len(), "query");
        collect_rows(rows)
    }

    /// Async twin of [`Connection::query`].
    ///
    /// # Errors
    ///
    /// Same as [`Connection::query`].
    pub async fn query_async<T: FromDbRow>(
        &mut self,
        query: &str,
        params: &QueryParams,
    ) -> Result<Vec<T>, SqlRowMapperError> {
        let driver = self.active_driver(query)?;
        let rows = driver.execute_rows_async(query, params).await?;
        trace!(query, rows = rows.len(), "query_async");
        collect_rows(rows)
    }

    /// Run a query and map its first row. `Ok(None)` when there are no rows; rows after the
    /// first are ignored.
    ///
    /// # Errors
    ///
    /// Same as [`Connection::query`], with conversion limited to the first row.
    pub fn single<T: FromDbRow>(
        &mut self,
        query: &str,
        params: &QueryParams,
    ) -> Result<Option<T>, SqlRowMapperError> {
        let driver = self.active_driver(query)?;
        let rows = driver.execute_rows(query, params)?;
        trace!(query, rows = rows.len(), "single");
        first_row(rows)
    }

    /// Async twin of [`Connection::single`].
    ///
    /// # Errors
    ///
    /// Same as [`Connection::single`].
    pub async fn single_async<T: FromDbRow>(
        &mut self,
        query: &str,
        params: &QueryParams,
    ) -> Result<Option<T>, SqlRowMapperError> {
        let driver = self.active_driver(query)?;
        let rows = driver.execute_rows_async(query, params).await?;
        trace!(query, rows = rows.len(), "single_async");
        first_row(rows)
    }
}

impl<D: Driver> Drop for Connection<D> {
    fn drop(&mut self) {
        if let Err(err) = self.dispose() {
            warn!(descriptor = %self.descriptor, error = %err, "failed to close driver on drop");
        }
    }
}

impl<D: Driver> fmt::Debug for Connection<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("descriptor", &self.descriptor)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
