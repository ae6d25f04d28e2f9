//! Error types used by the workhost runtime, work units, and logger.
//!
//! This module defines three error enums:
//!
//! - [`SupervisorError`] — errors raised by the supervision runtime itself.
//! - [`WorkError`] — failures raised by a work unit execution.
//! - [`LogError`] — failures raised by the ordered logger and its sinks.
//!
//! All types provide `as_label` (stable snake_case category for logs) and
//! `as_message` helpers, so the controller routine can record a failure's
//! category and description without any stack inspection.

use thiserror::Error;

use crate::core::ServiceState;

/// # Errors produced by the supervision runtime.
///
/// These represent contract violations against the supervisor itself, not
/// failures of the supervised work unit (those are absorbed and logged by the
/// controller routine, never returned to the caller).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SupervisorError {
    /// `start` was called while the supervisor is not in the `Created` state.
    #[error("start refused: supervisor is {state:?}")]
    AlreadyStarted {
        /// State observed at the time of the call.
        state: ServiceState,
    },

    /// `start` was called after the supervisor reached its terminal state.
    ///
    /// The stop latch never resets within one supervisor instance, so a
    /// stopped supervisor cannot be restarted; construct a new one.
    #[error("start refused: supervisor already stopped")]
    Stopped,

    /// No async runtime is available to host the controller routine.
    #[error("no runtime available to spawn the controller routine: {error}")]
    NoRuntime {
        /// Description from the runtime handle lookup.
        error: String,
    },

    /// The logger was disposed before `start`, so the controller routine
    /// would have no sink to report into.
    #[error("logger already disposed")]
    LoggerDisposed,
}

impl SupervisorError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SupervisorError::AlreadyStarted { .. } => "supervisor_already_started",
            SupervisorError::Stopped => "supervisor_stopped",
            SupervisorError::NoRuntime { .. } => "supervisor_no_runtime",
            SupervisorError::LoggerDisposed => "supervisor_logger_disposed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        self.to_string()
    }
}

/// # Failures produced by a work unit execution.
///
/// Every failure of the supervised unit is caught at the controller routine's
/// isolation boundary and converted into one of these variants; nothing is
/// re-raised past that boundary.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum WorkError {
    /// The unit returned an error from its own logic.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// The unit's task panicked; the payload was recovered from the join
    /// handle at the isolation boundary.
    #[error("execution panicked: {error}")]
    Panicked {
        /// The panic payload, downcast to text where possible.
        error: String,
    },

    /// Progress reporting failed because the logger was already disposed.
    #[error(transparent)]
    Log(#[from] LogError),
}

impl WorkError {
    /// Convenience constructor for plain failure messages.
    pub fn fail(error: impl Into<String>) -> Self {
        WorkError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use workhost::WorkError;
    ///
    /// let err = WorkError::fail("boom");
    /// assert_eq!(err.as_label(), "work_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            WorkError::Fail { .. } => "work_failed",
            WorkError::Panicked { .. } => "work_panicked",
            WorkError::Log(_) => "work_log_unavailable",
        }
    }

    /// Returns a human-readable message with details about the failure.
    pub fn as_message(&self) -> String {
        self.to_string()
    }
}

/// # Errors produced by the ordered logger.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum LogError {
    /// The logger was disposed; the sink handle is gone.
    ///
    /// This is a programming-contract violation, not a runtime condition to
    /// recover from: writes after disposal fail instead of silently dropping
    /// or re-opening the sink.
    #[error("logger already disposed")]
    Disposed,

    /// The underlying sink failed to accept the entry.
    #[error("sink write failed: {0}")]
    Sink(#[from] std::io::Error),
}

impl LogError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            LogError::Disposed => "log_disposed",
            LogError::Sink(_) => "log_sink_failed",
        }
    }
}
