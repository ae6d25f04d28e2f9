//! The ordered logger: one lock, one writer at a time, one total order.
//!
//! [`OrderedLogger`] serializes log writes from arbitrarily many concurrent
//! callers into the underlying sink while preserving a deterministic total
//! order, even though the sink's timestamp resolution is one second.
//!
//! ## Ordering algorithm
//! Under the logger's single lock:
//! ```text
//! now = wall clock
//! if now - last_write < 1s   → sequence += 1      (same window)
//! else                       → sequence = 1       (new window)
//! last_write = now
//! emit entry with order key (now, sequence)
//! ```
//! The comparison is signed, so a clock that steps backwards still lands in
//! the "same window" branch and the sequence keeps increasing — the order
//! key never collides.
//!
//! ## Disposal
//! The logger holds the sink exclusively. [`OrderedLogger::dispose`] drops
//! that handle; it is idempotent, and every later write fails with
//! [`LogError::Disposed`] rather than silently dropping the entry.

use std::sync::Mutex;

use chrono::{DateTime, Duration as ChronoDuration, Utc};

use crate::error::LogError;
use crate::logging::entry::{thread_label, LogEntry, Severity};
use crate::logging::sink::LogSink;

/// Minimum state needed to keep ordering monotonic across writers.
struct LoggerState {
    last_write: Option<DateTime<Utc>>,
    last_sequence: u32,
    /// `None` once disposed.
    sink: Option<Box<dyn LogSink>>,
}

/// Mutex-guarded, totally-ordering log writer.
///
/// One shared instance per supervisor; its state is owned exclusively by the
/// logger and mutated only under its own lock.
pub struct OrderedLogger {
    state: Mutex<LoggerState>,
}

impl OrderedLogger {
    /// Creates a logger that owns `sink` exclusively.
    pub fn new(sink: Box<dyn LogSink>) -> Self {
        Self {
            state: Mutex::new(LoggerState {
                last_write: None,
                last_sequence: 0,
                sink: Some(sink),
            }),
        }
    }

    /// Writes one entry, assigning its order key under the lock.
    ///
    /// `operation` is an explicit label supplied by the caller; the logger
    /// never guesses it from the call stack. The thread label is computed
    /// from the calling context's identity and is informational only.
    pub fn write(
        &self,
        severity: Severity,
        operation: &str,
        message: &str,
    ) -> Result<(), LogError> {
        let mut state = self.lock();
        write_locked(&mut state, severity, operation, message)
    }

    /// Shorthand for [`Severity::Information`] writes.
    pub fn info(&self, operation: &str, message: &str) -> Result<(), LogError> {
        self.write(Severity::Information, operation, message)
    }

    /// Shorthand for [`Severity::Warning`] writes.
    pub fn warn(&self, operation: &str, message: &str) -> Result<(), LogError> {
        self.write(Severity::Warning, operation, message)
    }

    /// Shorthand for [`Severity::Error`] writes.
    pub fn error(&self, operation: &str, message: &str) -> Result<(), LogError> {
        self.write(Severity::Error, operation, message)
    }

    /// Releases the sink. Idempotent: the second call is a no-op, never an
    /// error. Writes after disposal fail with [`LogError::Disposed`].
    pub fn dispose(&self) {
        let mut state = self.lock();
        state.sink = None;
    }

    /// Whether the logger has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.lock().sink.is_none()
    }

    /// Best-effort Error write for the process-wide failure hook.
    ///
    /// Never blocks: if the lock is contended — including by the panicking
    /// thread itself, mid-unwind with the guard still held — the entry is
    /// dropped instead of deadlocking. Diagnostic only.
    pub(crate) fn try_error(&self, operation: &str, message: &str) {
        if let Ok(mut state) = self.state.try_lock() {
            let _ = write_locked(&mut state, Severity::Error, operation, message);
        }
    }

    /// A panicking sink must not wedge every future write; the state is
    /// still coherent (the failed entry simply never updated it).
    fn lock(&self) -> std::sync::MutexGuard<'_, LoggerState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// The ordering algorithm proper; runs with the lock held.
fn write_locked(
    state: &mut LoggerState,
    severity: Severity,
    operation: &str,
    message: &str,
) -> Result<(), LogError> {
    if state.sink.is_none() {
        return Err(LogError::Disposed);
    }

    let now = Utc::now();
    let sequence = match state_window(&state.last_write, now) {
        Window::Same => state.last_sequence.saturating_add(1),
        Window::New => 1,
    };

    let entry = LogEntry {
        timestamp: now,
        sequence_in_second: sequence,
        severity,
        thread_label: thread_label(),
        operation: operation.to_string(),
        message: message.to_string(),
    };

    let sink = state.sink.as_deref_mut().ok_or(LogError::Disposed)?;
    sink.emit(&entry)?;

    state.last_write = Some(now);
    state.last_sequence = sequence;
    Ok(())
}

enum Window {
    Same,
    New,
}

fn state_window(last_write: &Option<DateTime<Utc>>, now: DateTime<Utc>) -> Window {
    match last_write {
        Some(last) if now.signed_duration_since(*last) < ChronoDuration::seconds(1) => {
            Window::Same
        }
        Some(_) => Window::New,
        None => Window::New,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::sink::MemorySink;
    use std::sync::Arc;

    fn logger_with_handle() -> (Arc<OrderedLogger>, crate::logging::sink::MemorySinkHandle) {
        let sink = MemorySink::new();
        let handle = sink.handle();
        (Arc::new(OrderedLogger::new(Box::new(sink))), handle)
    }

    #[test]
    fn sequences_increase_within_one_second() {
        let (logger, handle) = logger_with_handle();
        for i in 0..50 {
            logger.info("burst", &format!("entry {i}")).unwrap();
        }

        let entries = handle.snapshot();
        assert_eq!(entries.len(), 50);

        // Every consecutive gap is far below one second, so the window never
        // resets: sequences are strictly increasing integers starting at 1,
        // even if the burst happens to cross a calendar-second boundary.
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.sequence_in_second, i as u32 + 1);
        }
    }

    #[test]
    fn order_keys_never_collide_under_concurrency() {
        let (logger, handle) = logger_with_handle();
        std::thread::scope(|scope| {
            for t in 0..8 {
                let logger = Arc::clone(&logger);
                scope.spawn(move || {
                    for i in 0..25 {
                        logger.info("concurrent", &format!("t{t} i{i}")).unwrap();
                    }
                });
            }
        });

        let entries = handle.snapshot();
        assert_eq!(entries.len(), 200);

        let mut keys: Vec<(i64, u32)> = entries.iter().map(|e| e.order_key()).collect();
        let emitted = keys.clone();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 200, "order keys must be unique");
        // Emission order under the lock is already the total order.
        assert_eq!(emitted, {
            let mut sorted = emitted.clone();
            sorted.sort_unstable();
            sorted
        });
    }

    #[test]
    fn window_reset_after_one_second_gap() {
        let (logger, handle) = logger_with_handle();
        logger.info("gap", "first").unwrap();
        logger.info("gap", "second").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(1100));
        logger.info("gap", "after gap").unwrap();

        let entries = handle.snapshot();
        assert_eq!(entries[2].sequence_in_second, 1);
    }

    #[test]
    fn disposal_is_idempotent_and_blocks_writes() {
        let (logger, handle) = logger_with_handle();
        logger.info("op", "before").unwrap();

        logger.dispose();
        logger.dispose(); // second call is a no-op, not an error
        assert!(logger.is_disposed());

        let err = logger.info("op", "after").unwrap_err();
        assert!(matches!(err, LogError::Disposed));
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn first_write_opens_window_at_one() {
        let (logger, handle) = logger_with_handle();
        logger.warn("boot", "hello").unwrap();
        assert_eq!(handle.snapshot()[0].sequence_in_second, 1);
    }
}
