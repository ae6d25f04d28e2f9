//! Log entry data model.
//!
//! A [`LogEntry`] is created per write, immutable once constructed, handed to
//! the sink synchronously, and then discarded — the logger keeps no history.
//!
//! The entry's order key is `(timestamp, sequence_in_second)`: two entries
//! with the same stored second are still totally ordered by the sequence,
//! and entries from different one-second windows are ordered by timestamp
//! alone. See [`OrderedLogger`](crate::OrderedLogger) for how the key is
//! assigned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entry severity, passed to the sink as a distinct field.
///
/// Never encoded into the textual body; sinks that need it inline render it
/// themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Information,
    Warning,
    Error,
}

impl Severity {
    /// Short uppercase tag for human-readable sinks.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Severity::Information => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

/// One immutable log record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Wall-clock time of the write; storage may truncate it to seconds.
    pub timestamp: DateTime<Utc>,
    /// Position within the one-second window, starting at 1.
    pub sequence_in_second: u32,
    /// Severity, out-of-band from the body.
    pub severity: Severity,
    /// Identity of the execution context that issued the write.
    ///
    /// Informational only; has no effect on ordering.
    pub thread_label: String,
    /// Operation label supplied explicitly by the caller.
    pub operation: String,
    /// Free-form message.
    pub message: String,
}

impl LogEntry {
    /// Renders the human-readable body: three labeled lines.
    ///
    /// Severity is deliberately absent here (it travels as a field).
    pub fn body(&self) -> String {
        format!(
            "thread: {}\noperation: {}\nmessage: {}",
            self.thread_label, self.operation, self.message
        )
    }

    /// The `(timestamp truncated to seconds, sequence)` pair that totally
    /// orders entries in storage.
    pub fn order_key(&self) -> (i64, u32) {
        (self.timestamp.timestamp(), self.sequence_in_second)
    }
}

/// Builds the label for the calling execution context: the thread name when
/// one is set, otherwise "unnamed", plus the numeric thread identifier.
pub(crate) fn thread_label() -> String {
    let current = std::thread::current();
    match current.name() {
        Some(name) => format!("{name} {:?}", current.id()),
        None => format!("unnamed {:?}", current.id()),
    }
}
