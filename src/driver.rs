use async_trait::async_trait;

use crate::error::SqlRowMapperError;
use crate::results::ResultSet;
use crate::types::QueryParams;

/// The capabilities a database driver provides to [`Connection`](crate::Connection).
///
/// Query text and parameters arrive exactly as the caller passed them. Errors a driver
/// raises are handed back to the caller unchanged, so a driver should report its own
/// failures through the variant that describes them best (`SqliteError`, `Driver`,
/// `ConnectionError`, `ExecutionError`).
#[async_trait]
pub trait Driver: Send {
    /// Open a driver connection for `descriptor`. The format of the descriptor is up to the
    /// driver.
    fn open(descriptor: &str) -> Result<Self, SqlRowMapperError>
    where
        Self: Sized;

    /// Release the underlying connection. Called at most once.
    fn close(&mut self) -> Result<(), SqlRowMapperError>;

    /// Run a statement for its side effects.
    fn execute_non_query(
        &mut self,
        query: &str,
        params: &QueryParams,
    ) -> Result<(), SqlRowMapperError>;

    /// Run a query and return its rows in iteration order.
    fn execute_rows(
        &mut self,
        query: &str,
        params: &QueryParams,
    ) -> Result<ResultSet, SqlRowMapperError>;

    /// Async twin of [`Driver::execute_non_query`].
    async fn execute_non_query_async(
        &mut self,
        query: &str,
        params: &QueryParams,
    ) -> Result<(), SqlRowMapperError>;

    /// Async twin of [`Driver::execute_rows`].
    async fn execute_rows_async(
        &mut self,
        query: &str,
        params: &QueryParams,
    ) -> Result<ResultSet, SqlRowMapperError>;
}
