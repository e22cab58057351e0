//! Scheduler configuration and construction-time validation.

use std::error::Error;
use std::fmt;

/// Tunables for the worker pool and batch composition.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Number of worker threads; must be positive.
    pub workers: usize,
    /// Maximum requests drained into one batch; must be positive.
    pub max_batch: usize,
    /// CPU cores workers are pinned to, assigned round-robin. Empty leaves
    /// placement to the OS.
    pub worker_cores: Vec<usize>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            max_batch: 8,
            worker_cores: Vec::new(),
        }
    }
}

impl SchedulerConfig {
    /// Reject misconfiguration eagerly, before any thread is spawned.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.workers == 0 {
            return Err(SchedulerError::InvalidConfiguration(
                "worker count must be positive",
            ));
        }
        if self.max_batch == 0 {
            return Err(SchedulerError::InvalidConfiguration(
                "max batch size must be positive",
            ));
        }
        Ok(())
    }
}

/// The only failure surface: misconfiguration at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    InvalidConfiguration(&'static str),
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::InvalidConfiguration(reason) => {
                write!(f, "invalid configuration: {reason}")
            }
        }
    }
}

impl Error for SchedulerError {}
