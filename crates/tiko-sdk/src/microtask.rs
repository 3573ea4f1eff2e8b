//! MicrotaskEngine trait — the external microtask capability
//!
//! The scheduler does not own a microtask queue. It consumes one through
//! this trait: drain-to-exhaustion between tick-queue fixpoints, direct
//! fire-and-forget submission, and report-and-clear of pending
//! unhandled-rejection warnings.

use std::cell::RefCell;
use std::collections::VecDeque;

/// Trait for the external microtask engine consumed by the drain loop.
pub trait MicrotaskEngine {
    /// Run all currently queued microtasks to completion.
    ///
    /// A running microtask may enqueue more; those must also run before
    /// this call returns.
    fn run_microtasks(&self);

    /// Enqueue a microtask directly, bypassing the tick queue.
    ///
    /// Ordered among microtasks only, never among deferred records.
    fn enqueue_microtask(&self, microtask: Box<dyn FnOnce()>);

    /// Report and clear any rejections pending a warning.
    ///
    /// Returns whether any were found. Called once per outer drain-loop
    /// iteration; a `true` return forces another pass. Engines without a
    /// promise layer keep the default.
    fn process_rejections(&self) -> bool {
        false
    }
}

/// A minimal FIFO microtask engine.
///
/// Suitable for embedders that have no promise machinery of their own and
/// for tests. Single-threaded; re-entrant enqueues from running microtasks
/// are drained in the same `run_microtasks` call.
#[derive(Default)]
pub struct SimpleMicrotaskQueue {
    queue: RefCell<VecDeque<Box<dyn FnOnce()>>>,
}

impl SimpleMicrotaskQueue {
    /// Create a new empty microtask queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of microtasks currently queued
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Check if no microtasks are queued
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl MicrotaskEngine for SimpleMicrotaskQueue {
    fn run_microtasks(&self) {
        loop {
            // Release the borrow before invoking: the microtask may enqueue.
            let next = self.queue.borrow_mut().pop_front();
            match next {
                Some(microtask) => microtask(),
                None => break,
            }
        }
    }

    fn enqueue_microtask(&self, microtask: Box<dyn FnOnce()>) {
        self.queue.borrow_mut().push_back(microtask);
    }
}
