//! Pluggable log destinations.
//!
//! A [`LogSink`] receives fully-formed [`LogEntry`] values, already totally
//! ordered by the logger. Sinks are handed to the logger at construction and
//! owned exclusively by it until disposal.
//!
//! Built-ins:
//! - [`ConsoleSink`] — human-readable lines on stdout
//! - [`FileSink`] — append-only text file
//! - [`MemorySink`] — captures entries for assertions in tests

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::error::LogError;
use crate::logging::entry::LogEntry;

/// Destination for ordered log entries.
///
/// Called with the logger's lock held, so implementations see entries one at
/// a time, in order, and must not block for long.
pub trait LogSink: Send {
    /// Accepts one entry. An `Err` is surfaced to the writer as
    /// [`LogError::Sink`].
    fn emit(&mut self, entry: &LogEntry) -> Result<(), LogError>;
}

/// Renders one entry as text: order key, severity tag, then the body with
/// continuation lines indented.
fn render(entry: &LogEntry) -> String {
    let mut out = format!(
        "{} #{:03} [{}]",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.sequence_in_second,
        entry.severity.as_tag(),
    );
    for line in entry.body().lines() {
        out.push_str("\n    ");
        out.push_str(line);
    }
    out.push('\n');
    out
}

/// Writes human-readable entries to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for ConsoleSink {
    fn emit(&mut self, entry: &LogEntry) -> Result<(), LogError> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(render(entry).as_bytes())?;
        Ok(())
    }
}

/// Appends human-readable entries to a file.
#[derive(Debug)]
pub struct FileSink {
    file: File,
}

impl FileSink {
    /// Opens (or creates) the file in append mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }
}

impl LogSink for FileSink {
    fn emit(&mut self, entry: &LogEntry) -> Result<(), LogError> {
        self.file.write_all(render(entry).as_bytes())?;
        Ok(())
    }
}

/// Captures entries in memory; the handle stays valid after the logger takes
/// ownership of the sink, so tests can inspect what was written.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle onto the captured entries.
    pub fn handle(&self) -> MemorySinkHandle {
        MemorySinkHandle {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl LogSink for MemorySink {
    fn emit(&mut self, entry: &LogEntry) -> Result<(), LogError> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(entry.clone());
        Ok(())
    }
}

/// Read-side view of a [`MemorySink`].
#[derive(Debug, Clone)]
pub struct MemorySinkHandle {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl MemorySinkHandle {
    /// Snapshot of everything captured so far, in emission order.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of captured entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::entry::Severity;
    use chrono::Utc;

    #[test]
    fn render_keeps_severity_out_of_body_lines() {
        let entry = LogEntry {
            timestamp: Utc::now(),
            sequence_in_second: 7,
            severity: Severity::Warning,
            thread_label: "worker ThreadId(2)".to_string(),
            operation: "cycle".to_string(),
            message: "pausing before restart".to_string(),
        };
        let text = render(&entry);
        assert!(text.contains("#007 [WARN]"));
        assert!(text.contains("    thread: worker ThreadId(2)"));
        assert!(text.contains("    operation: cycle"));
        assert!(text.contains("    message: pausing before restart"));
    }

    #[test]
    fn memory_sink_handle_sees_emitted_entries() {
        let mut sink = MemorySink::new();
        let handle = sink.handle();
        let entry = LogEntry {
            timestamp: Utc::now(),
            sequence_in_second: 1,
            severity: Severity::Information,
            thread_label: "t".to_string(),
            operation: "op".to_string(),
            message: "m".to_string(),
        };
        sink.emit(&entry).unwrap();
        assert_eq!(handle.len(), 1);
        assert_eq!(handle.snapshot()[0].message, "m");
    }
}
