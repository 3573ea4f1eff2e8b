//! Tick Scheduler — deferred callbacks and the rejection-aware drain loop
//!
//! Deferred callbacks go through a chunked FIFO ([`FixedQueue`]); the
//! drain loop alternates between emptying it to a fixpoint and running the
//! external microtask engine, with ambient-context propagation
//! ([`ContextStore`]) and unhandled-rejection bookkeeping
//! ([`RejectionTracker`]) around it.

mod context;
mod queue;
mod rejections;
#[allow(clippy::module_inception)]
mod scheduler;
mod task;

pub use context::{ContextFrame, ContextScope, ContextStore};
pub use queue::{FixedQueue, DEFAULT_CHUNK_CAPACITY};
pub use rejections::{RejectionSignal, RejectionTracker};
pub use scheduler::{SchedulerConfig, SchedulerStats, TickScheduler};
pub use task::{CallArgs, TickTask};
