//! Error types for host callbacks

/// Result type returned by host callbacks
pub type CallbackResult = Result<(), CallbackError>;

/// Failure raised by a host callback during execution.
///
/// The scheduler never recovers from one of these: the drain loop finishes
/// the failing record's notifications, then surfaces the error to the host.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct CallbackError(pub String);

impl CallbackError {
    /// Create a callback error from a message
    pub fn new(message: impl Into<String>) -> Self {
        CallbackError(message.into())
    }
}

impl From<String> for CallbackError {
    fn from(s: String) -> Self {
        CallbackError(s)
    }
}

impl From<&str> for CallbackError {
    fn from(s: &str) -> Self {
        CallbackError(s.to_string())
    }
}
