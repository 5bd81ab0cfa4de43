//! Benchmarks for the bounded history buffer and the append pipeline.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use femtoreport::{
    BoundedHistory, Context, LogEvent, Notifier, NotifierError, ReportAppender, Severity,
    ThrowableInfo,
};

struct SinkNotifier;

impl Notifier for SinkNotifier {
    fn notify(&self, _message: &str, _context: &Context) -> Result<(), NotifierError> {
        Ok(())
    }

    fn notify_error(
        &self,
        _message: &str,
        _error: &ThrowableInfo,
        _context: &Context,
    ) -> Result<(), NotifierError> {
        Ok(())
    }
}

fn history_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");

    group.bench_function("add_at_capacity", |b| {
        let history = BoundedHistory::new(100);
        for i in 0..100 {
            history.add(format!("warm-up line {i}"));
        }
        b.iter(|| {
            history.add(black_box("2024-01-01T00:00:00.000Z INFO steady state"));
        });
    });

    group.bench_function("snapshot_of_100_lines", |b| {
        let history = BoundedHistory::new(100);
        for i in 0..100 {
            history.add(format!("2024-01-01T00:00:00.000Z INFO request {i} handled"));
        }
        b.iter(|| black_box(history.snapshot()));
    });

    group.finish();
}

fn append_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("append");

    let appender = ReportAppender::builder()
        .with_notifier(Arc::new(SinkNotifier))
        .build()
        .expect("build appender");
    let below = LogEvent::new(Severity::Info, "request handled");
    let above = LogEvent::new(Severity::Error, "request failed");

    group.bench_function("buffer_only_below_threshold", |b| {
        b.iter(|| appender.append(black_box(&below)));
    });

    group.bench_function("full_dispatch_above_threshold", |b| {
        b.iter(|| appender.append(black_box(&above)));
    });

    group.finish();
}

criterion_group!(benches, history_benchmarks, append_benchmarks);
criterion_main!(benches);
