//! Worker pool orchestration.
//!
//! [`BatchScheduler`] owns the request queue, the metrics sink, and a fixed
//! set of worker threads. Workers block on the queue, drain bounded batches,
//! sleep for the simulated batch cost, and record one latency sample per
//! completed request. Shutdown signals the queue and joins every worker, so
//! requests queued before the signal are still processed.

use crate::config::{SchedulerConfig, SchedulerError};
use crate::cost::{CostModel, TokenLinearCost};
use crate::metrics::{MetricsSink, MetricsSnapshot, SchedulerReport};
use crate::queue::RequestQueue;
use crate::threading::set_thread_core;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

pub struct BatchScheduler {
    queue: Arc<RequestQueue>,
    metrics: Arc<MetricsSink>,
    cost: Arc<dyn CostModel>,
    config: SchedulerConfig,
    workers: Mutex<Vec<JoinHandle<()>>>,
    started: AtomicBool,
}

impl BatchScheduler {
    /// Build a scheduler with the default linear token cost.
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        Self::with_cost_model(config, Arc::new(TokenLinearCost::default()))
    }

    /// Build a scheduler around a caller-provided cost model.
    pub fn with_cost_model(
        config: SchedulerConfig,
        cost: Arc<dyn CostModel>,
    ) -> Result<Self, SchedulerError> {
        config.validate()?;
        Ok(Self {
            queue: Arc::new(RequestQueue::new()),
            metrics: Arc::new(MetricsSink::new()),
            cost,
            config,
            workers: Mutex::new(Vec::new()),
            started: AtomicBool::new(false),
        })
    }

    /// Spawn the worker pool and start the throughput clock.
    ///
    /// Subsequent calls are no-ops; only one pool is ever spawned.
    pub fn start(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }
        self.metrics.mark_start();

        let mut workers = self.workers.lock();
        for worker_id in 0..self.config.workers {
            let queue = self.queue.clone();
            let metrics = self.metrics.clone();
            let cost = self.cost.clone();
            let max_batch = self.config.max_batch;
            let core = (!self.config.worker_cores.is_empty())
                .then(|| self.config.worker_cores[worker_id % self.config.worker_cores.len()]);

            let handle = thread::Builder::new()
                .name(format!("batch-worker-{worker_id}"))
                .spawn(move || {
                    if let Some(core_id) = core {
                        set_thread_core(core_id);
                    }
                    worker_loop(queue, metrics, cost, max_batch);
                })
                .expect("failed to spawn batch worker thread");
            workers.push(handle);
        }
    }

    /// Admit a request and wake an idle worker. Returns the assigned id.
    pub fn submit(&self, priority: i32, tokens: u32) -> u64 {
        self.queue.submit(priority, tokens)
    }

    /// Number of requests currently waiting in the queue.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Signal shutdown and block until every worker has drained and joined.
    pub fn shutdown(&self) {
        self.queue.signal_shutdown();
        let handles: Vec<JoinHandle<()>> = self.workers.lock().drain(..).collect();
        for handle in handles {
            let _ = handle.join();
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn report(&self) -> SchedulerReport {
        self.metrics.snapshot().report()
    }
}

/// Worker body: drain a batch, then sleep for the simulated cost and record
/// one latency sample per request.
///
/// The sleep happens with no queue lock held. An empty batch means either a
/// spurious wake (loop again) or shutdown with a drained queue (terminate).
fn worker_loop(
    queue: Arc<RequestQueue>,
    metrics: Arc<MetricsSink>,
    cost: Arc<dyn CostModel>,
    max_batch: usize,
) {
    loop {
        let batch = queue.drain_batch(max_batch);
        if batch.is_empty() {
            if queue.is_shut_down() {
                break;
            }
            continue;
        }

        let total_tokens: u64 = batch.iter().map(|request| request.tokens as u64).sum();
        let work = cost.batch_cost(total_tokens);
        if !work.is_zero() {
            thread::sleep(work);
        }

        let completed_at = Instant::now();
        for request in &batch {
            metrics.record(request.id, completed_at - request.enqueued_at);
        }
        metrics.add_processed(batch.len() as u64);
    }
}
