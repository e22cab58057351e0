//! Latency metrics collection and reporting.
//!
//! Workers record one sample per completed request through an unbounded
//! lock-free channel, so the recording path never contends with the request
//! queue. Samples are folded into a guarded vector when a snapshot is taken,
//! which normally happens once after every worker has joined.

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Completion record for a single request.
#[derive(Debug, Clone, Copy)]
pub struct LatencySample {
    pub request_id: u64,
    /// Elapsed time from enqueue to completion.
    pub latency: Duration,
}

/// Shared sink all workers append completion data into.
pub struct MetricsSink {
    samples_tx: Sender<LatencySample>,
    samples_rx: Receiver<LatencySample>,
    collected: Mutex<Vec<LatencySample>>,
    processed: AtomicU64,
    started_at: Mutex<Instant>,
}

impl MetricsSink {
    pub fn new() -> Self {
        let (samples_tx, samples_rx) = unbounded();
        Self {
            samples_tx,
            samples_rx,
            collected: Mutex::new(Vec::new()),
            processed: AtomicU64::new(0),
            started_at: Mutex::new(Instant::now()),
        }
    }

    /// Reset the throughput clock; called when the worker pool starts.
    pub(crate) fn mark_start(&self) {
        *self.started_at.lock() = Instant::now();
    }

    /// Append one latency sample.
    ///
    /// Never blocks: the channel is unbounded and its receiving side lives in
    /// this sink, so the send cannot fail in practice.
    pub fn record(&self, request_id: u64, latency: Duration) {
        let _ = self.samples_tx.send(LatencySample {
            request_id,
            latency,
        });
    }

    /// Bump the processed-request counter by a completed batch's length.
    pub fn add_processed(&self, count: u64) {
        self.processed.fetch_add(count, Ordering::Relaxed);
    }

    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    /// Fold pending samples into the collected vector and copy everything out.
    ///
    /// Meant to be called after the workers have joined, but safe against
    /// concurrent recording: samples still in flight are picked up by a later
    /// snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let mut collected = self.collected.lock();
        while let Ok(sample) = self.samples_rx.try_recv() {
            collected.push(sample);
        }
        MetricsSnapshot {
            processed: self.processed.load(Ordering::Relaxed),
            elapsed: self.started_at.lock().elapsed(),
            samples: collected.clone(),
        }
    }
}

impl Default for MetricsSink {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of everything the sink has recorded.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub processed: u64,
    pub elapsed: Duration,
    pub samples: Vec<LatencySample>,
}

impl MetricsSnapshot {
    /// Derive throughput and tail-latency statistics.
    ///
    /// Percentiles use the index-based definition: samples are sorted
    /// ascending and the value at index `floor(p * N)`, clamped to the last
    /// index, is reported. This is intentionally not an interpolated
    /// percentile.
    pub fn report(&self) -> SchedulerReport {
        let mut sorted: Vec<Duration> = self.samples.iter().map(|s| s.latency).collect();
        sorted.sort();

        let elapsed_secs = self.elapsed.as_secs_f64();
        let throughput = if elapsed_secs > 0.0 {
            self.processed as f64 / elapsed_secs
        } else {
            0.0
        };

        SchedulerReport {
            processed: self.processed,
            elapsed: self.elapsed,
            throughput,
            p50: percentile(&sorted, 0.50),
            p95: percentile(&sorted, 0.95),
            p99: percentile(&sorted, 0.99),
        }
    }
}

/// Aggregate statistics handed to the caller after shutdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerReport {
    pub processed: u64,
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
    /// Requests per second over the run.
    pub throughput: f64,
    #[serde(with = "duration_millis")]
    pub p50: Duration,
    #[serde(with = "duration_millis")]
    pub p95: Duration,
    #[serde(with = "duration_millis")]
    pub p99: Duration,
}

/// Value at index `floor(p * N)` of an ascending-sorted sample slice,
/// clamped to the last index. Empty input yields zero.
pub fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let index = ((p * sorted.len() as f64) as usize).min(sorted.len() - 1);
    sorted[index]
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    // Serialize as milliseconds (f64) to keep reports human-readable.
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(duration.as_secs_f64() * 1_000.0)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = f64::deserialize(deserializer)?;
        Ok(Duration::from_secs_f64(millis / 1_000.0))
    }
}
