//! Thread-safe priority queue feeding the worker pool.
//!
//! The queue is a max-heap on priority protected by a single mutex and
//! condition variable. Producers push and wake one worker; workers block
//! until work arrives or shutdown is signaled, then remove up to a bounded
//! batch. Shutdown is a graceful drain: the flag stops blocking waits but
//! queued requests are still handed out until the heap is empty.

use crate::request::Request;
use parking_lot::{Condvar, Mutex};
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

pub struct RequestQueue {
    heap: Mutex<BinaryHeap<Request>>,
    available: Condvar,
    shutdown: AtomicBool,
    next_id: AtomicU64,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self {
            heap: Mutex::new(BinaryHeap::new()),
            available: Condvar::new(),
            shutdown: AtomicBool::new(false),
            next_id: AtomicU64::new(0),
        }
    }

    /// Admit a request and wake one blocked worker.
    ///
    /// Assigns a fresh id, stamps the monotonic enqueue time, and returns
    /// immediately: the queue is unbounded, so producers never block.
    pub fn submit(&self, priority: i32, tokens: u32) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = Request {
            id,
            priority,
            tokens,
            enqueued_at: Instant::now(),
        };
        {
            let mut heap = self.heap.lock();
            heap.push(request);
        }
        self.available.notify_one();
        id
    }

    /// Remove up to `max_items` highest-priority requests, blocking while the
    /// queue is empty and shutdown has not been signaled.
    ///
    /// Returns an empty batch only when shutdown has been signaled and the
    /// heap is empty, which tells the calling worker to terminate. A
    /// `max_items` of zero also yields an empty batch without touching the
    /// heap.
    pub fn drain_batch(&self, max_items: usize) -> Vec<Request> {
        if max_items == 0 {
            return Vec::new();
        }
        let mut heap = self.heap.lock();
        loop {
            if !heap.is_empty() {
                let mut batch = Vec::with_capacity(max_items.min(heap.len()));
                while batch.len() < max_items {
                    match heap.pop() {
                        Some(request) => batch.push(request),
                        None => break,
                    }
                }
                return batch;
            }
            if self.shutdown.load(Ordering::Acquire) {
                return Vec::new();
            }
            // Releases the mutex while blocked; re-acquired on wake.
            self.available.wait(&mut heap);
        }
    }

    /// Flip the persistent shutdown flag and wake every blocked worker.
    ///
    /// The flag is set while holding the queue mutex so a worker between its
    /// empty-check and its wait cannot miss the wakeup. Pending requests are
    /// not removed; workers keep draining until the heap is empty.
    pub fn signal_shutdown(&self) {
        {
            let _guard = self.heap.lock();
            self.shutdown.store(true, Ordering::Release);
        }
        self.available.notify_all();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.heap.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.lock().is_empty()
    }
}

impl Default for RequestQueue {
    fn default() -> Self {
        Self::new()
    }
}
