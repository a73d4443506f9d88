use sql_row_mapper::prelude::*;
use sql_row_mapper::test_utils::{CallKind, DriverLog, MemoryDriver, result_set};

const BLANK_QUERIES: [&str; 4] = ["", " ", "\t", " \n\r\t "];
const OK_QUERY: &str = "SELECT 1";
const FAILING: &str = "SELECT * FROM missing_table";

fn connection() -> (Connection<MemoryDriver>, DriverLog) {
    let driver = MemoryDriver::new()
        .with_rows(OK_QUERY, result_set(&["1"], vec![vec![RowValues::Int(1)]]))
        .with_failure(FAILING, "no such table: missing_table");
    let log = driver.log();
    (Connection::from_driver("memory", driver), log)
}

/// Runs all six operations against `query` and returns their errors in a fixed order.
async fn all_six(
    conn: &mut Connection<MemoryDriver>,
    query: &str,
) -> Vec<(&'static str, Option<SqlRowMapperError>)> {
    let none = QueryParams::new();
    vec![
        ("execute", conn.execute(query, &none).err()),
        ("execute_async", conn.execute_async(query, &none).await.err()),
        ("query", conn.query::<i64>(query, &none).err()),
        ("query_async", conn.query_async::<i64>(query, &none).await.err()),
        ("single", conn.single::<i64>(query, &none).err()),
        ("single_async", conn.single_async::<i64>(query, &none).await.err()),
    ]
}

#[tokio::test]
async fn blank_query_is_an_argument_error_for_every_operation() {
    let (mut conn, log) = connection();
    for query in BLANK_QUERIES {
        for (op, err) in all_six(&mut conn, query).await {
            let err = err.unwrap_or_else(|| panic!("{op} accepted {query:?}"));
            assert!(err.is_argument_error(), "{op} with {query:?}: {err:?}");
        }
    }
    assert_eq!(log.call_count(), 0, "driver must not be reached");
}

#[tokio::test]
async fn disposed_connection_rejects_every_operation() -> Result<(), SqlRowMapperError> {
    let (mut conn, log) = connection();
    conn.dispose()?;
    assert!(conn.is_disposed());

    for (op, err) in all_six(&mut conn, OK_QUERY).await {
        let err = err.unwrap_or_else(|| panic!("{op} ran on a disposed connection"));
        assert!(err.is_invalid_state(), "{op}: {err:?}");
    }
    assert_eq!(log.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn blank_query_on_disposed_connection_reports_the_argument() -> Result<(), SqlRowMapperError>
{
    let (mut conn, _log) = connection();
    conn.dispose()?;
    for (op, err) in all_six(&mut conn, "  ").await {
        assert!(err.is_some_and(|e| e.is_argument_error()), "{op}");
    }
    Ok(())
}

#[test]
fn async_validation_happens_before_suspending() {
    use std::future::Future;
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    let (mut conn, log) = connection();
    let none = QueryParams::new();
    let mut cx = Context::from_waker(Waker::noop());

    let mut fut = pin!(conn.query_async::<i64>("   ", &none));
    match fut.as_mut().poll(&mut cx) {
        Poll::Ready(Err(err)) => assert!(err.is_argument_error()),
        other => panic!("expected an immediate argument error, got {other:?}"),
    }
    assert_eq!(log.call_count(), 0);
}

#[test]
fn dispose_closes_the_driver_once() -> Result<(), SqlRowMapperError> {
    let (mut conn, log) = connection();
    assert_eq!(log.close_count(), 0);
    conn.dispose()?;
    conn.dispose()?;
    drop(conn);
    assert_eq!(log.close_count(), 1);
    Ok(())
}

#[test]
fn drop_disposes_an_active_connection() {
    let (conn, log) = connection();
    assert!(!conn.is_disposed());
    drop(conn);
    assert_eq!(log.close_count(), 1);
}

#[test]
fn failed_close_still_disposes() {
    let driver = MemoryDriver::new().with_close_failure("socket already gone");
    let log = driver.log();
    let mut conn = Connection::from_driver("memory", driver);

    match conn.dispose() {
        Err(SqlRowMapperError::ExecutionError(message)) => {
            assert_eq!(message, "socket already gone");
        }
        other => panic!("expected the close error, got {other:?}"),
    }
    assert!(conn.is_disposed());
    assert!(conn
        .query::<i64>(OK_QUERY, &QueryParams::new())
        .unwrap_err()
        .is_invalid_state());
    assert!(conn.dispose().is_ok());
    drop(conn);
    assert_eq!(log.close_count(), 1);
}

#[test]
fn drop_survives_a_failed_close() {
    let driver = MemoryDriver::new().with_close_failure("socket already gone");
    let log = driver.log();
    let conn = Connection::from_driver("memory", driver);
    drop(conn);
    assert_eq!(log.close_count(), 1);
}

#[test]
fn drop_releases_the_driver_after_a_failed_call() {
    let (mut conn, log) = connection();
    assert!(conn.query::<i64>(FAILING, &QueryParams::new()).is_err());
    drop(conn);
    assert_eq!(log.close_count(), 1);
}

#[tokio::test]
async fn driver_errors_pass_through_unchanged() {
    let (mut conn, _log) = connection();
    for (op, err) in all_six(&mut conn, FAILING).await {
        match err {
            Some(SqlRowMapperError::ExecutionError(message)) => {
                assert_eq!(message, "no such table: missing_table", "{op}");
            }
            other => panic!("{op}: expected the driver's error, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn query_and_params_reach_the_driver_as_given() -> Result<(), SqlRowMapperError> {
    let (mut conn, log) = connection();
    let params = QueryParams::new()
        .with_value("id", 7)
        .with_value("name", "ada");

    conn.execute("UPDATE t SET name = :name WHERE id = :id", &params)?;
    conn.query_async::<i64>(OK_QUERY, &params).await?;

    let calls = log.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].kind, CallKind::NonQuery);
    assert_eq!(calls[0].query, "UPDATE t SET name = :name WHERE id = :id");
    assert_eq!(calls[0].params, params);
    assert!(!calls[0].is_async);
    assert_eq!(calls[1].kind, CallKind::Rows);
    assert!(calls[1].is_async);
    Ok(())
}

#[test]
fn open_uses_the_descriptor() -> Result<(), SqlRowMapperError> {
    let mut conn: Connection<MemoryDriver> = Connection::open("memory://scratch")?;
    assert_eq!(conn.descriptor(), "memory://scratch");
    assert!(conn.query::<i64>(OK_QUERY, &QueryParams::new())?.is_empty());
    Ok(())
}
