//! Simulated processing cost for drained batches.

use std::time::Duration;

/// Cost function backing the worker's suspend step.
///
/// The scheduler only ever asks for the cost of a whole batch, so a
/// production variant can substitute a real accelerator call here without
/// touching the queue or worker logic.
pub trait CostModel: Send + Sync {
    /// Processing duration for a batch whose requests sum to `total_tokens`.
    fn batch_cost(&self, total_tokens: u64) -> Duration;
}

/// Linear per-token cost, identical for every worker.
#[derive(Debug, Clone)]
pub struct TokenLinearCost {
    pub per_token: Duration,
}

impl Default for TokenLinearCost {
    fn default() -> Self {
        // 0.02 ms per token.
        Self {
            per_token: Duration::from_micros(20),
        }
    }
}

impl CostModel for TokenLinearCost {
    fn batch_cost(&self, total_tokens: u64) -> Duration {
        self.per_token.mul_f64(total_tokens as f64)
    }
}
