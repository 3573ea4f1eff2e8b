//! Tiko Deferred-Task Engine
//!
//! This crate provides the scheduler that sits between a host event loop
//! and an external microtask (promise-continuation) engine:
//! - **Queue**: unbounded chunked FIFO of deferred-callback records
//!   (`scheduler::FixedQueue`)
//! - **Drain loop**: brings the tick queue and the microtask queue to a
//!   simultaneous fixpoint with deterministic interleaving
//!   (`scheduler::TickScheduler`)
//! - **Context**: ambient-frame capture at submission, swap/restore around
//!   execution (`scheduler::ContextStore`)
//! - **Rejections**: unhandled-rejection warn flag forcing extra drain
//!   passes (`scheduler::RejectionTracker`)
//!
//! Host collaborators (the microtask engine, the observer) are consumed
//! through the traits in [`tiko_sdk`], re-exported here.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use tiko_engine::{TickScheduler, SimpleMicrotaskQueue};
//!
//! let scheduler = Rc::new(TickScheduler::new(Rc::new(SimpleMicrotaskQueue::new())));
//!
//! let nested = scheduler.clone();
//! scheduler.schedule(move || {
//!     // Runs in the same drain pass, before any microtask.
//!     nested.schedule(|| println!("second"));
//!     println!("first");
//! });
//!
//! // Host loop, once per iteration:
//! scheduler.run_if_needed()?;
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// ============================================================================
// Core Modules
// ============================================================================

/// Error types for scheduler operations
pub mod error;

/// Scheduler module: queue, context, rejections, and the drain loop
pub mod scheduler;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{SchedulerError, SchedulerResult};

pub use scheduler::{
    // Queue
    FixedQueue, DEFAULT_CHUNK_CAPACITY,
    // Context propagation
    ContextFrame, ContextScope, ContextStore,
    // Rejection bookkeeping
    RejectionSignal, RejectionTracker,
    // Scheduler
    SchedulerConfig, SchedulerStats, TickScheduler,
    // Records
    CallArgs, TickTask,
};

// SDK types (for hosts that depend on the engine alone)
pub use tiko_sdk::{
    CallbackError, CallbackResult, MicrotaskEngine, NoopObserver, SimpleMicrotaskQueue,
    TaskCallback, TaskKind, TaskObserver, TaskValue, TickId,
};
