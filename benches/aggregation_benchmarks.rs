//! Performance benchmarks for the weekly payroll aggregation.
//!
//! Each log holds two weeks of full days (sign-in, lunch pair, sign-out)
//! per person:
//! - Aggregation over 10, 100 and 1000 people
//! - Row validation plus aggregation from raw CSV rows
//! - The `/summary` endpoint over a seeded CSV log
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use timesheet_payroll::api::{create_router, AppState};
use timesheet_payroll::calculation::{aggregate, summarize};
use timesheet_payroll::config::ConfigLoader;
use timesheet_payroll::event_log::EventLog;
use timesheet_payroll::models::{Action, PersonKey, RawRow, TimeEvent};
use timesheet_payroll::notify::DisabledNotifier;
use timesheet_payroll::store::CsvEventStore;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const WORK_DAYS: [i64; 10] = [0, 1, 2, 3, 4, 7, 8, 9, 10, 11];

fn hms(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Creates ten full working days for each of `people` people.
fn create_events(people: usize) -> Vec<TimeEvent> {
    let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
    let mut events = Vec::with_capacity(people * WORK_DAYS.len() * 4);
    for i in 0..people {
        let person = PersonKey::new(format!("Worker{:04}", i), "Bench");
        for offset in WORK_DAYS {
            let date = monday + Duration::days(offset);
            for (action, time) in [
                (Action::SignIn, hms(8, 0)),
                (Action::LunchOut, hms(12, 0)),
                (Action::LunchIn, hms(12, 30)),
                (Action::SignOut, hms(17, 0)),
            ] {
                events.push(TimeEvent {
                    person: person.clone(),
                    action,
                    date,
                    time,
                    source_ip: None,
                });
            }
        }
    }
    events
}

fn create_rows(people: usize) -> Vec<RawRow> {
    create_events(people).iter().map(RawRow::from).collect()
}

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/nctt").expect("Failed to load config")
}

/// Benchmark: aggregation of an already validated log.
fn bench_aggregate(c: &mut Criterion) {
    let config = load_config();
    let mut group = c.benchmark_group("aggregate");

    for people in [10usize, 100, 1000] {
        let log = EventLog::new(create_events(people));
        group.throughput(Throughput::Elements(log.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(people), &log, |b, log| {
            b.iter(|| black_box(aggregate(black_box(log), config.rates())))
        });
    }

    group.finish();
}

/// Benchmark: validation plus aggregation of stored rows.
fn bench_summarize(c: &mut Criterion) {
    let config = load_config();
    let mut group = c.benchmark_group("summarize");

    for people in [10usize, 100, 1000] {
        let rows = create_rows(people);
        group.throughput(Throughput::Elements(rows.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(people), &rows, |b, rows| {
            b.iter(|| black_box(summarize(black_box(rows), config.rates())))
        });
    }

    group.finish();
}

/// Benchmark: `/summary` over a CSV log of 100 people.
fn bench_summary_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dir = tempfile::TempDir::new().unwrap();
    let store = CsvEventStore::new(dir.path().join("timesheet.csv"));
    store.save_rows(&create_rows(100)).unwrap();

    let state = AppState::with_parts(load_config(), Arc::new(store), Arc::new(DisabledNotifier));
    let router = create_router(state);

    c.bench_function("summary_endpoint_100_people", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .uri("/summary")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_aggregate,
    bench_summarize,
    bench_summary_endpoint
);
criterion_main!(benches);
