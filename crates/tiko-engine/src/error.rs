//! Error types for the tick scheduler

use tiko_sdk::{CallbackError, TickId};

/// Result type for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Scheduler error taxonomy.
///
/// Submission-time rejection happens before any state changes; a drain-time
/// callback failure aborts the current pass after the failing record's
/// cleanup notifications have fired. The silent drop of a post-shutdown
/// submission is a documented policy, not an error.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// The submitted unit of work is not callable
    #[error("callback is not callable: got {got}")]
    InvalidCallback {
        /// Type name of the rejected value
        got: &'static str,
    },

    /// A deferred callback failed during the drain loop
    #[error("deferred callback {id} failed: {source}")]
    CallbackFailure {
        /// Id of the failing record
        id: TickId,
        /// The failure raised by the callback
        #[source]
        source: CallbackError,
    },
}
