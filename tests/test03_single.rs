use sql_row_mapper::prelude::*;
use sql_row_mapper::test_utils::{MemoryDriver, result_set};

const MANY: &str = "SELECT v FROM many";
const NONE: &str = "SELECT v FROM none";
const NULL_FIRST: &str = "SELECT v FROM null_first";

fn connection() -> Connection<MemoryDriver> {
    let driver = MemoryDriver::new()
        .with_rows(
            MANY,
            result_set(
                &["v"],
                vec![
                    vec![RowValues::Int(1)],
                    // never inspected: would fail if it were
                    vec![RowValues::Text("not a number".into())],
                ],
            ),
        )
        .with_rows(NONE, result_set(&["v"], Vec::new()))
        .with_rows(
            NULL_FIRST,
            result_set(&["v"], vec![vec![RowValues::Null], vec![RowValues::Int(9)]]),
        );
    Connection::from_driver("memory", driver)
}

#[test]
fn single_on_empty_set_is_not_found() -> Result<(), SqlRowMapperError> {
    let mut conn = connection();
    let none = QueryParams::new();
    assert_eq!(conn.single::<i64>(NONE, &none)?, None);
    assert_eq!(conn.single::<Option<i64>>(NONE, &none)?, None);
    assert!(conn.single::<DbRecord>(NONE, &none)?.is_none());
    Ok(())
}

#[tokio::test]
async fn single_async_on_empty_set_is_not_found() -> Result<(), SqlRowMapperError> {
    let mut conn = connection();
    let none = QueryParams::new();
    assert_eq!(conn.single_async::<i64>(NONE, &none).await?, None);
    assert_eq!(conn.single_async::<Option<i64>>(NONE, &none).await?, None);
    assert!(conn.single_async::<DbRecord>(NONE, &none).await?.is_none());
    Ok(())
}

#[test]
fn single_maps_only_the_first_row() -> Result<(), SqlRowMapperError> {
    let mut conn = connection();
    let none = QueryParams::new();
    assert_eq!(conn.single::<i64>(MANY, &none)?, Some(1));
    assert_eq!(conn.single::<Option<u8>>(MANY, &none)?, Some(Some(1)));
    // the list form does look at the second row
    assert!(conn.query::<i64>(MANY, &none).unwrap_err().is_conversion_error());
    Ok(())
}

#[tokio::test]
async fn single_async_maps_only_the_first_row() -> Result<(), SqlRowMapperError> {
    let mut conn = connection();
    let none = QueryParams::new();
    assert_eq!(conn.single_async::<i64>(MANY, &none).await?, Some(1));
    assert_eq!(conn.single_async::<Option<u8>>(MANY, &none).await?, Some(Some(1)));
    Ok(())
}

#[test]
fn found_null_differs_from_not_found() -> Result<(), SqlRowMapperError> {
    let mut conn = connection();
    let none = QueryParams::new();
    assert_eq!(conn.single::<Option<i64>>(NULL_FIRST, &none)?, Some(None));
    assert_eq!(conn.single::<i64>(NULL_FIRST, &none)?, Some(0));
    assert_eq!(conn.single::<Option<i64>>(NONE, &none)?, None);
    Ok(())
}
