use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use inferline::metrics::percentile;
use inferline::RequestQueue;

fn bench_request_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_queue");

    group.bench_function("submit", |b| {
        let queue = RequestQueue::new();
        b.iter(|| {
            queue.submit(black_box(5), black_box(128));
        });
    });

    group.bench_function("submit_then_drain_batch", |b| {
        let queue = RequestQueue::new();
        b.iter(|| {
            for i in 0..16 {
                queue.submit(i % 10, 128);
            }
            black_box(queue.drain_batch(16));
        });
    });

    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");

    group.bench_function("percentile_10k", |b| {
        let sorted: Vec<Duration> = (0..10_000).map(Duration::from_micros).collect();
        b.iter(|| black_box(percentile(black_box(&sorted), 0.99)));
    });

    group.finish();
}

criterion_group!(benches, bench_request_queue, bench_report);
criterion_main!(benches);
