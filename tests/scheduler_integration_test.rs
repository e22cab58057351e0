// End-to-end scheduler tests: every submitted request is processed exactly
// once, shutdown drains the queue, and the report stays consistent with the
// snapshot.

use inferline::{BatchScheduler, CostModel, SchedulerConfig, TokenLinearCost};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

fn scheduler(workers: usize, max_batch: usize, per_token: Duration) -> BatchScheduler {
    BatchScheduler::with_cost_model(
        SchedulerConfig {
            workers,
            max_batch,
            worker_cores: Vec::new(),
        },
        Arc::new(TokenLinearCost { per_token }),
    )
    .expect("valid config")
}

#[test]
fn every_request_recorded_exactly_once() {
    let scheduler = scheduler(4, 8, Duration::from_nanos(100));
    scheduler.start();

    let mut submitted = HashSet::new();
    for i in 0..100 {
        let id = scheduler.submit((i % 10) as i32, 16);
        assert!(submitted.insert(id), "duplicate id issued");
    }
    scheduler.shutdown();

    let snapshot = scheduler.snapshot();
    assert_eq!(snapshot.processed, 100);
    assert_eq!(snapshot.samples.len(), 100);

    let recorded: HashSet<u64> = snapshot.samples.iter().map(|s| s.request_id).collect();
    assert_eq!(recorded, submitted);
}

#[test]
fn immediate_shutdown_drains_pending_queue() {
    let scheduler = scheduler(2, 4, Duration::from_micros(1));
    scheduler.start();

    for i in 0..50 {
        scheduler.submit(i % 5, 8);
    }
    scheduler.shutdown();

    assert_eq!(scheduler.snapshot().processed, 50);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn zero_token_requests_still_complete() {
    let scheduler = scheduler(1, 4, Duration::from_micros(20));
    scheduler.start();

    let id = scheduler.submit(1, 0);
    scheduler.shutdown();

    let snapshot = scheduler.snapshot();
    assert_eq!(snapshot.processed, 1);
    assert_eq!(snapshot.samples[0].request_id, id);
}

#[test]
fn idle_workers_wake_on_submit() {
    let scheduler = scheduler(2, 4, Duration::ZERO);
    scheduler.start();

    // Workers are parked on the empty queue before anything arrives.
    std::thread::sleep(Duration::from_millis(50));
    for i in 0..10 {
        scheduler.submit(i, 4);
    }
    scheduler.shutdown();

    assert_eq!(scheduler.snapshot().processed, 10);
}

#[test]
fn report_is_consistent_with_snapshot() {
    let scheduler = scheduler(4, 8, Duration::from_nanos(500));
    scheduler.start();

    for i in 0..64 {
        scheduler.submit(i % 3, 32);
    }
    scheduler.shutdown();

    let report = scheduler.report();
    assert_eq!(report.processed, 64);
    assert!(report.throughput > 0.0);
    assert!(report.p50 <= report.p95);
    assert!(report.p95 <= report.p99);
}

#[test]
fn custom_cost_model_drives_processing() {
    struct FixedCost(Duration);
    impl CostModel for FixedCost {
        fn batch_cost(&self, _total_tokens: u64) -> Duration {
            self.0
        }
    }

    let scheduler = BatchScheduler::with_cost_model(
        SchedulerConfig {
            workers: 1,
            max_batch: 16,
            worker_cores: Vec::new(),
        },
        Arc::new(FixedCost(Duration::from_millis(5))),
    )
    .expect("valid config");
    scheduler.start();

    for i in 0..8 {
        scheduler.submit(i, 1);
    }
    scheduler.shutdown();

    let snapshot = scheduler.snapshot();
    assert_eq!(snapshot.processed, 8);
    // Every request waited for at least one 5ms batch.
    for sample in &snapshot.samples {
        assert!(sample.latency >= Duration::from_millis(5));
    }
}
