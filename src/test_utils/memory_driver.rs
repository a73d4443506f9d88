use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::driver::Driver;
use crate::error::SqlRowMapperError;
use crate::results::ResultSet;
use crate::types::QueryParams;

/// Which driver entry point was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    NonQuery,
    Rows,
}

/// One recorded driver invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverCall {
    pub kind: CallKind,
    pub query: String,
    pub params: QueryParams,
    pub is_async: bool,
}

#[derive(Debug, Default)]
struct LogState {
    calls: Vec<DriverCall>,
    closes: usize,
}

/// Shared view of what a [`MemoryDriver`] was asked to do. Stays readable after the driver
/// has been moved into a `Connection` or dropped.
#[derive(Debug, Clone, Default)]
pub struct DriverLog {
    inner: Arc<Mutex<LogState>>,
}

impl DriverLog {
    fn with_state<R>(&self, f: impl FnOnce(&mut LogState) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    #[must_use]
    pub fn calls(&self) -> Vec<DriverCall> {
        self.with_state(|state| state.calls.clone())
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.with_state(|state| state.calls.len())
    }

    #[must_use]
    pub fn close_count(&self) -> usize {
        self.with_state(|state| state.closes)
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Rows(ResultSet),
    Fail(String),
}

/// Driver that answers from a script keyed by query text.
///
/// Unscripted queries return an empty result set and unscripted statements succeed.
/// A failure is reported as `SqlRowMapperError::ExecutionError` carrying the scripted
/// message, for both statements and queries.
#[derive(Debug, Default)]
pub struct MemoryDriver {
    script: HashMap<String, Scripted>,
    close_failure: Option<String>,
    log: DriverLog,
}

impl MemoryDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rows(mut self, query: &str, rows: ResultSet) -> Self {
        self.script.insert(query.to_owned(), Scripted::Rows(rows));
        self
    }

    #[must_use]
    pub fn with_failure(mut self, query: &str, message: &str) -> Self {
        self.script
            .insert(query.to_owned(), Scripted::Fail(message.to_owned()));
        self
    }

    /// Make `close` report `ExecutionError(message)`. The close is still counted.
    #[must_use]
    pub fn with_close_failure(mut self, message: &str) -> Self {
        self.close_failure = Some(message.to_owned());
        self
    }

    #[must_use]
    pub fn log(&self) -> DriverLog {
        self.log.clone()
    }

    fn record(&self, kind: CallKind, query: &str, params: &QueryParams, is_async: bool) {
        self.log.with_state(|state| {
            state.calls.push(DriverCall {
                kind,
                query: query.to_owned(),
                params: params.clone(),
                is_async,
            });
        });
    }

    fn answer_rows(&self, query: &str) -> Result<ResultSet, SqlRowMapperError> {
        match self.script.get(query) {
            Some(Scripted::Rows(rows)) => Ok(rows.clone()),
            Some(Scripted::Fail(message)) => {
                Err(SqlRowMapperError::ExecutionError(message.clone()))
            }
            None => Ok(ResultSet::default()),
        }
    }

    fn answer_non_query(&self, query: &str) -> Result<(), SqlRowMapperError> {
        match self.script.get(query) {
            Some(Scripted::Fail(message)) => {
                Err(SqlRowMapperError::ExecutionError(message.clone()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl Driver for MemoryDriver {
    fn open(_descriptor: &str) -> Result<Self, SqlRowMapperError> {
        Ok(Self::new())
    }

    fn close(&mut self) -> Result<(), SqlRowMapperError> {
        self.log.with_state(|state| state.closes += 1);
        match &self.close_failure {
            Some(message) => Err(SqlRowMapperError::ExecutionError(message.clone())),
            None => Ok(()),
        }
    }

    fn execute_non_query(
        &mut self,
        query: &str,
        params: &QueryParams,
    ) -> Result<(), SqlRowMapperError> {
        self.record(CallKind::NonQuery, query, params, false);
        self.answer_non_query(query)
    }

    fn execute_rows(
        &mut self,
        query: &str,
        params: &QueryParams,
    ) -> Result<ResultSet, SqlRowMapperError> {
        self.record(CallKind::Rows, query, params, false);
        self.answer_rows(query)
    }

    async fn execute_non_query_async(
        &mut self,
        query: &str,
        params: &QueryParams,
    ) -> Result<(), SqlRowMapperError> {
        tokio::task::yield_now().await;
        self.record(CallKind::NonQuery, query, params, true);
        self.answer_non_query(query)
    }

    async fn execute_rows_async(
        &mut self,
        query: &str,
        params: &QueryParams,
    ) -> Result<ResultSet, SqlRowMapperError> {
        tokio::task::yield_now().await;
        self.record(CallKind::Rows, query, params, true);
        self.answer_rows(query)
    }
}
