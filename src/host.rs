//! Adapters between the supervisor and an external process manager.
//!
//! The process manager owns the outer lifecycle: it calls `OnStart` with a
//! hard timeout (conventionally 10 s), `OnStop` when the unit should stop,
//! and `OnShutdown` when the whole process is terminating. [`LifecycleHooks`]
//! is that contract re-expressed as a plain trait; the host adapts it to
//! whatever hook shape its platform requires.
//!
//! [`run_interactive`] supports the debug mode of the command-line surface:
//! the start hook runs in the calling context and OS termination signals are
//! translated into `shutdown`.
//!
//! ## Signals
//! **Unix platforms:**
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//! - `SIGQUIT`
//!
//! **Other platforms:** Ctrl-C via [`tokio::signal::ctrl_c`].

use crate::core::Supervisor;
use crate::error::SupervisorError;

/// Lifecycle hooks the host process manager drives.
///
/// Each hook must return within the host's timeout; none of them block on
/// the work unit.
pub trait LifecycleHooks {
    /// Triggered by the host's start hook.
    fn on_start(&self, args: &[String]) -> Result<(), SupervisorError>;

    /// Triggered when the host stops this unit.
    fn on_stop(&self);

    /// Triggered when the host process itself is terminating.
    fn on_shutdown(&self);
}

impl LifecycleHooks for Supervisor {
    fn on_start(&self, args: &[String]) -> Result<(), SupervisorError> {
        self.start(args)
    }

    fn on_stop(&self) {
        self.request_stop();
    }

    fn on_shutdown(&self) {
        self.shutdown();
    }
}

/// Waits for a termination signal.
///
/// Each call creates independent signal listeners.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {},
        _ = sigint.recv()  => {},
        _ = sigterm.recv() => {},
        _ = sigquit.recv() => {},
    }
    Ok(())
}

/// Waits for a termination signal.
///
/// Each call creates independent signal listeners.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

/// Debug-mode driver: blocks until a termination signal arrives, then
/// requests shutdown and waits for the controller routine to exit.
///
/// The supervisor must already be started; this function owns the rest of
/// the interactive session.
pub async fn run_interactive(supervisor: &Supervisor) -> std::io::Result<()> {
    wait_for_shutdown_signal().await?;
    supervisor.shutdown();
    supervisor.join().await;
    Ok(())
}
