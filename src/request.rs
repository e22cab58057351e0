//! Request representation shared by the queue and the worker pool.

use std::cmp::Ordering;
use std::time::Instant;

/// A unit of work admitted into the scheduler.
///
/// Each [`Request`] carries the urgency tag used for queue ordering and the
/// token count driving simulated processing cost. The timestamp is stamped at
/// submission so workers can compute completion latency.
#[derive(Debug, Clone)]
pub struct Request {
    /// Identifier unique per submission.
    pub id: u64,
    /// Urgency tag; higher values are dequeued first.
    pub priority: i32,
    /// Input size, proportional to processing cost. Zero is legal and
    /// contributes no cost.
    pub tokens: u32,
    /// Monotonic submission time, assigned by the queue.
    pub enqueued_at: Instant,
}

impl Ord for Request {
    /// Compare by priority alone so `BinaryHeap<Request>` pops the most
    /// urgent request first. Equal-priority order is unspecified.
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority.cmp(&other.priority)
    }
}

impl PartialOrd for Request {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Request {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl Eq for Request {}
