//! # workhost
//!
//! **workhost** keeps one long-running unit of work alive inside a host
//! process that is itself managed by an external process manager (systemd,
//! a Windows service host, a container runtime).
//!
//! It provides two tightly coupled building blocks:
//! - a [`Supervisor`] that launches a caller-supplied [`WorkUnit`] on its own
//!   execution context, isolates its crashes, and restarts it after a fixed
//!   delay until a stop is requested;
//! - an [`OrderedLogger`] that serializes concurrent log writes and stamps
//!   each entry with a per-second sequence number, so the true order of
//!   events survives storage with second-granularity timestamps.
//!
//! ## Architecture
//! ```text
//!  host process manager (OnStart / OnStop / OnShutdown)
//!        │
//!        ▼
//!  ┌───────────────────────────────────────────────┐
//!  │ Supervisor                                    │
//!  │  - ServiceState machine                       │
//!  │  - StopSignal (mutex-guarded latch)           │
//!  │  - RestartPolicy (fixed delay, default 3s)    │
//!  └──────┬────────────────────────────────────────┘
//!         │ start() spawns once, returns immediately
//!         ▼
//!  controller routine (one per supervisor, long-lived)
//!    loop while stop latch is down {
//!      ├─► spawn WorkUnit execution, await its JoinHandle
//!      │       └─ Err / panic ──► logger.error(label, message)
//!      ├─► re-check latch
//!      └─► interruptible sleep(restart_delay), repeat
//!    }
//!    └─► logger: "stopping" ──► state = Stopped
//!
//!  OrderedLogger (shared, one lock)
//!    write ──► (timestamp, sequence_in_second) ──► LogSink
//! ```
//!
//! ## Rules
//! - `start()` never blocks: all real work happens on the controller routine.
//! - Stopping is cooperative: the work unit polls [`WorkContext`] and returns
//!   promptly; nothing is preempted.
//! - A work unit that returns cleanly without a stop request is restarted
//!   just like a crashed one; the supervisor's job is continuous availability.
//! - Worker failures never propagate past the controller routine; the log
//!   sink is the only operator-visible failure channel.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use workhost::{
//!     ConsoleSink, HostConfig, OrderedLogger, Supervisor, WorkError, WorkFn, WorkRef,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let logger = Arc::new(OrderedLogger::new(Box::new(ConsoleSink::new())));
//!
//!     let unit: WorkRef = WorkFn::arc("poller", |ctx| async move {
//!         while !ctx.should_stop() {
//!             ctx.progress("polling")?;
//!             tokio::time::sleep(Duration::from_millis(500)).await;
//!         }
//!         Ok::<_, WorkError>(())
//!     });
//!
//!     let sup = Supervisor::new(HostConfig::default(), unit, logger);
//!     sup.start(&[])?;
//!     workhost::host::run_interactive(&sup).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod signal;

mod core;
pub mod host;
mod logging;
mod work;

pub use config::{HostConfig, RestartPolicy, EVENT_SOURCE_KEY, RESTART_DELAY_KEY};
pub use core::{ServiceState, Supervisor};
pub use error::{LogError, SupervisorError, WorkError};
pub use host::LifecycleHooks;
pub use logging::{
    ConsoleSink, FileSink, LogEntry, LogSink, MemorySink, MemorySinkHandle, OrderedLogger,
    Severity,
};
pub use signal::StopSignal;
pub use work::{WorkContext, WorkFn, WorkRef, WorkUnit};
