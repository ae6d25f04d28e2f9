//! Ordered logging: data model, sinks, and the serializing logger.
//!
//! This module groups the log **data model** and the **logger** that turns
//! concurrent writes from arbitrarily many callers into a total order the
//! sink can store, even when the sink's own timestamp resolution is one
//! second.
//!
//! ## Contents
//! - [`Severity`], [`LogEntry`] — entry classification and payload
//! - [`LogSink`] — pluggable destination ([`ConsoleSink`], [`FileSink`],
//!   [`MemorySink`])
//! - [`OrderedLogger`] — mutex-guarded writer that assigns the
//!   `(timestamp, sequence_in_second)` order key
//!
//! ## Quick reference
//! - **Writers**: the supervisor, the controller routine, and work units
//!   (through [`WorkContext::progress`](crate::WorkContext::progress)).
//! - **Consumer**: exactly one sink, held exclusively by the logger until
//!   [`OrderedLogger::dispose`] is called.

mod entry;
mod logger;
mod sink;

pub use entry::{LogEntry, Severity};
pub use logger::OrderedLogger;
pub use sink::{ConsoleSink, FileSink, LogSink, MemorySink, MemorySinkHandle};
