//! Criterion measurements of the mapping layer alone. Rows come from the scripted
//! in-memory driver so storage costs stay out of the numbers.

use std::hint::black_box;
use std::sync::LazyLock;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sql_row_mapper::prelude::*;
use sql_row_mapper::test_utils::{MemoryDriver, result_set};
use tokio::runtime::Runtime;

const QUERY: &str = "SELECT id, name, score, active FROM bench";

static TOKIO_RUNTIME: LazyLock<Runtime> =
    LazyLock::new(|| Runtime::new().expect("create tokio runtime"));

/// Resolve how many rows each scripted result set carries.
fn row_count() -> usize {
    std::env::var("BENCH_ROWS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(1000)
}

fn connection(rows: usize) -> Connection<MemoryDriver> {
    let data = (0..rows as i64)
        .map(|id| {
            vec![
                if id % 2 == 0 { RowValues::Int(id) } else { RowValues::Null },
                RowValues::Text(format!("name-{id}")),
                RowValues::Float(id as f64 * 0.5),
                RowValues::Int(id % 2),
            ]
        })
        .collect();
    let driver = MemoryDriver::new().with_rows(
        QUERY,
        result_set(&["id", "name", "score", "active"], data),
    );
    Connection::from_driver("bench", driver)
}

#[derive(Debug)]
struct BenchRow {
    _id: Option<i64>,
    _name: String,
    _score: f64,
    _active: bool,
}

impl FromDbRow for BenchRow {
    fn from_db_row(row: &DbRow) -> Result<Self, SqlRowMapperError> {
        Ok(Self {
            _id: row.try_get("id")?,
            _name: row.try_get("name")?,
            _score: row.try_get("score")?,
            _active: row.try_get("active")?,
        })
    }
}

fn bench_target_shapes(c: &mut Criterion) {
    let rows = row_count();
    let none = QueryParams::new();
    let mut group = c.benchmark_group("row_mapping");
    group.throughput(Throughput::Elements(rows as u64));

    let mut conn = connection(rows);
    group.bench_with_input(BenchmarkId::new("scalar", rows), &rows, |b, _| {
        b.iter(|| black_box(conn.query::<i64>(QUERY, &none).expect("scalar rows")));
    });
    group.bench_with_input(BenchmarkId::new("nullable", rows), &rows, |b, _| {
        b.iter(|| black_box(conn.query::<Option<i64>>(QUERY, &none).expect("nullable rows")));
    });
    group.bench_with_input(BenchmarkId::new("record", rows), &rows, |b, _| {
        b.iter(|| black_box(conn.query::<DbRecord>(QUERY, &none).expect("record rows")));
    });
    group.bench_with_input(BenchmarkId::new("struct", rows), &rows, |b, _| {
        b.iter(|| black_box(conn.query::<BenchRow>(QUERY, &none).expect("struct rows")));
    });
    group.finish();
}

fn bench_async_overhead(c: &mut Criterion) {
    let rows = row_count();
    let mut group = c.benchmark_group("row_mapping_async");
    group.throughput(Throughput::Elements(rows as u64));

    group.bench_with_input(BenchmarkId::new("nullable", rows), &rows, |b, &rows| {
        b.to_async(&*TOKIO_RUNTIME).iter(|| async move {
            let mut conn = connection(rows);
            let mapped = conn
                .query_async::<Option<i64>>(QUERY, &QueryParams::new())
                .await
                .expect("nullable rows");
            black_box(mapped)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_target_shapes, bench_async_overhead);
criterion_main!(benches);
