//! # Supervisor: lifecycle state machine and external control surface.
//!
//! The [`Supervisor`] owns the [`ServiceState`] machine, the stop latch, the
//! shared [`OrderedLogger`], and the restart policy. It launches the
//! controller routine exactly once and exposes the cooperative
//! `start` / `request_stop` / `shutdown` hooks an external controller drives.
//!
//! ## Key responsibilities
//! - `start()` returns to its caller immediately (the host enforces a hard
//!   timeout, conventionally 10 s); all real work happens on the controller
//!   routine.
//! - worker failures never propagate to the caller of `start` — they are
//!   absorbed at the runner's isolation boundary and recovered by the
//!   restart policy.
//! - a process-wide panic hook is installed at `start` so otherwise-unhandled
//!   failures still leave a diagnostic entry. It cannot recover anything:
//!   corruption-class failures terminate the process, and recovery is the
//!   external process manager's job.
//!
//! ## State machine
//! ```text
//! Created ──start()──► Starting ──first cycle──► Running
//!                                                   │ request_stop()/shutdown()
//!                                                   ▼
//!                                             StopRequested ──controller exits──► Stopped
//! ```
//! `Stopped` is terminal: the stop latch never resets within one instance,
//! so a stopped supervisor is never restarted — construct a new one.

use std::sync::{Arc, Mutex, Once, Weak};

use tokio::task::JoinHandle;

use crate::config::{HostConfig, RestartPolicy};
use crate::core::controller;
use crate::error::SupervisorError;
use crate::logging::OrderedLogger;
use crate::signal::StopSignal;
use crate::work::WorkRef;

/// Lifecycle states, driven only by the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// Constructed, controller routine not yet launched.
    Created,
    /// `start` accepted; controller routine spawned but not yet cycling.
    Starting,
    /// Controller routine is cycling the work unit.
    Running,
    /// Stop latch raised; the controller exits after the in-flight cycle.
    StopRequested,
    /// Terminal. Reached exactly once, never re-entered.
    Stopped,
}

/// State shared between the supervisor handle and its controller routine.
pub(crate) struct Shared {
    state: Mutex<ServiceState>,
    pub(crate) stop: Arc<StopSignal>,
    pub(crate) logger: Arc<OrderedLogger>,
    pub(crate) policy: RestartPolicy,
    pub(crate) work: WorkRef,
    event_source: String,
}

impl Shared {
    pub(crate) fn state(&self) -> ServiceState {
        *self.lock_state()
    }

    pub(crate) fn set_state(&self, to: ServiceState) {
        *self.lock_state() = to;
    }

    /// First-cycle transition; a stop requested before the first cycle wins.
    pub(crate) fn enter_running(&self) {
        let mut state = self.lock_state();
        if *state == ServiceState::Starting {
            *state = ServiceState::Running;
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ServiceState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Keeps one work unit alive until a stop is requested.
///
/// One instance owns one stop latch and one logger; there are no process-wide
/// singletons. See the crate-level docs for the full control flow.
pub struct Supervisor {
    shared: Arc<Shared>,
    controller: Mutex<Option<JoinHandle<()>>>,
}

impl Supervisor {
    /// Creates a supervisor around `work`, resolving the restart policy from
    /// `cfg` once. The logger instance is shared: the host may keep a handle
    /// for its own lifecycle logging.
    pub fn new(cfg: HostConfig, work: WorkRef, logger: Arc<OrderedLogger>) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ServiceState::Created),
                stop: Arc::new(StopSignal::new()),
                logger,
                policy: cfg.restart,
                work,
                event_source: cfg.event_source,
            }),
            controller: Mutex::new(None),
        }
    }

    /// Launches the controller routine and returns immediately.
    ///
    /// Fails if the supervisor is not freshly constructed, if the logger was
    /// already disposed, or if no async runtime is available to host the
    /// routine. On success the state moves to `Starting` and, once the first
    /// cycle begins, asynchronously to `Running`.
    pub fn start(&self, args: &[String]) -> Result<(), SupervisorError> {
        {
            let mut state = self.shared.lock_state();
            match *state {
                ServiceState::Created => {}
                ServiceState::Stopped => return Err(SupervisorError::Stopped),
                other => return Err(SupervisorError::AlreadyStarted { state: other }),
            }
            if self.shared.logger.is_disposed() {
                return Err(SupervisorError::LoggerDisposed);
            }
            *state = ServiceState::Starting;
        }

        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            self.shared.set_state(ServiceState::Created);
            SupervisorError::NoRuntime {
                error: e.to_string(),
            }
        })?;

        install_failure_hook(&self.shared.logger);

        let _ = self.shared.logger.info(
            "Supervisor::start",
            &format!(
                "starting controller routine (source: {}, args: {})",
                self.shared.event_source,
                args.join(" ")
            ),
        );

        let handle = runtime.spawn(controller::run(Arc::clone(&self.shared)));
        *self.lock_controller() = Some(handle);
        Ok(())
    }

    /// Raises the stop latch. Idempotent, never blocks: stopping is
    /// cooperative, and the in-flight work unit execution is allowed to
    /// finish naturally.
    pub fn request_stop(&self) {
        self.stop_with_reason("Supervisor::request_stop", "stop requested");
    }

    /// Same semantics as [`request_stop`](Self::request_stop), logged with
    /// the distinct reason that the host process itself is terminating.
    pub fn shutdown(&self) {
        self.stop_with_reason(
            "Supervisor::shutdown",
            "host process is terminating; stopping",
        );
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ServiceState {
        self.shared.state()
    }

    /// Waits for the controller routine to exit (state `Stopped`).
    ///
    /// Completes immediately if the routine already exited or was never
    /// started.
    pub async fn join(&self) {
        let handle = self.lock_controller().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    fn stop_with_reason(&self, operation: &str, message: &str) {
        let changed = self.shared.stop.set(true);
        {
            let mut state = self.shared.lock_state();
            if *state != ServiceState::Stopped {
                *state = ServiceState::StopRequested;
            }
        }
        // Log once across repeated and concurrent calls.
        if changed {
            let _ = self.shared.logger.info(operation, message);
        }
    }

    fn lock_controller(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.controller
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Target of the process-wide failure hook. The hook itself is installed
/// once per process and chains to whatever hook was there before; the target
/// follows the most recently started supervisor.
static HOOK_TARGET: Mutex<Option<Weak<OrderedLogger>>> = Mutex::new(None);
static HOOK_INSTALL: Once = Once::new();

/// Registers a diagnostic-only handler for otherwise-unhandled panics.
///
/// The hook logs and steps aside; it never attempts recovery. A weak
/// reference keeps a disposed supervisor's logger collectable.
fn install_failure_hook(logger: &Arc<OrderedLogger>) {
    {
        let mut target = HOOK_TARGET
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *target = Some(Arc::downgrade(logger));
    }

    HOOK_INSTALL.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let target = HOOK_TARGET
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone();
            if let Some(logger) = target.as_ref().and_then(Weak::upgrade) {
                logger.try_error("process.unhandled", &info.to_string());
            }
            previous(info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemorySink;
    use crate::work::{WorkFn, WorkRef};

    fn idle_unit() -> WorkRef {
        WorkFn::arc("idle", |ctx| async move {
            ctx.stopped().await;
            Ok::<(), crate::error::WorkError>(())
        })
    }

    fn supervisor() -> Supervisor {
        let logger = Arc::new(OrderedLogger::new(Box::new(MemorySink::new())));
        Supervisor::new(HostConfig::default(), idle_unit(), logger)
    }

    #[test]
    fn start_without_runtime_fails_cleanly() {
        let sup = supervisor();
        let err = sup.start(&[]).unwrap_err();
        assert_eq!(err.as_label(), "supervisor_no_runtime");
        // The failed start left the supervisor startable.
        assert_eq!(sup.state(), ServiceState::Created);
    }

    #[test]
    fn start_with_disposed_logger_fails() {
        let logger = Arc::new(OrderedLogger::new(Box::new(MemorySink::new())));
        logger.dispose();
        let sup = Supervisor::new(HostConfig::default(), idle_unit(), logger);
        let err = sup.start(&[]).unwrap_err();
        assert_eq!(err.as_label(), "supervisor_logger_disposed");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn double_start_is_refused() {
        let sup = supervisor();
        sup.start(&[]).unwrap();
        let err = sup.start(&[]).unwrap_err();
        assert_eq!(err.as_label(), "supervisor_already_started");

        sup.request_stop();
        sup.join().await;
        assert_eq!(sup.state(), ServiceState::Stopped);

        // Terminal state: the latch cannot reset, so restart is refused.
        let err = sup.start(&[]).unwrap_err();
        assert_eq!(err.as_label(), "supervisor_stopped");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn request_stop_is_idempotent() {
        let sink = MemorySink::new();
        let handle = sink.handle();
        let logger = Arc::new(OrderedLogger::new(Box::new(sink)));
        let sup = Supervisor::new(HostConfig::default(), idle_unit(), logger);

        sup.start(&[]).unwrap();
        sup.request_stop();
        sup.request_stop();
        sup.shutdown();
        sup.join().await;

        let stop_entries: Vec<_> = handle
            .snapshot()
            .into_iter()
            .filter(|e| e.operation.contains("request_stop") || e.operation.contains("shutdown"))
            .collect();
        assert_eq!(stop_entries.len(), 1, "stop reason logged exactly once");
    }
}
