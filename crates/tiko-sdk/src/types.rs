//! Shared identifier types

use std::fmt;

/// Unique identifier for a scheduled unit of work.
///
/// Ids are allocated monotonically by the owning scheduler instance, so
/// two schedulers may hand out the same numeric id. [`TickId::ROOT`] is
/// reserved for "no causally active task" and is never assigned to a
/// record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickId(u64);

impl TickId {
    /// The implicit root id used as trigger when no task is executing
    pub const ROOT: TickId = TickId(0);

    /// Get the numeric id value
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Create a TickId from a u64 value
    pub fn from_u64(id: u64) -> Self {
        TickId(id)
    }

    /// Check whether this is the root id
    pub fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of a scheduled unit of work, reported to observer `init` hooks
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// A deferred callback going through the tick queue
    Tick,
    /// A fire-and-forget callback handed directly to the microtask engine
    Microtask,
}

impl TaskKind {
    /// Resource-type label for this kind
    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::Tick => "TickObject",
            TaskKind::Microtask => "Microtask",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
