//! Priority-aware batched inference scheduler.
//!
//! Requests tagged with an urgency and a token count enter a shared
//! max-priority queue; a fixed pool of worker threads drains bounded batches,
//! sleeps for a deterministic size-dependent cost in place of real inference,
//! and records per-request completion latency for the final throughput and
//! percentile report.

pub mod config;
pub mod cost;
pub mod metrics;
pub mod queue;
pub mod request;
pub mod scheduler;
pub mod threading;

// Re-export for easier testing
pub use config::{SchedulerConfig, SchedulerError};
pub use cost::{CostModel, TokenLinearCost};
pub use metrics::{LatencySample, MetricsSnapshot, SchedulerReport};
pub use queue::RequestQueue;
pub use request::Request;
pub use scheduler::BatchScheduler;
