//! Per-execution view handed to a work unit at launch.

use std::sync::Arc;

use crate::error::LogError;
use crate::logging::OrderedLogger;
use crate::signal::StopSignal;

/// Everything a work unit may touch while running: the stop signal (read
/// side only) and a progress channel into the supervisor's logger.
///
/// Each execution gets a fresh context; no other state is shared with the
/// controller routine.
#[derive(Clone)]
pub struct WorkContext {
    stop: Arc<StopSignal>,
    logger: Arc<OrderedLogger>,
    operation: Arc<str>,
}

impl WorkContext {
    pub(crate) fn new(stop: Arc<StopSignal>, logger: Arc<OrderedLogger>, unit_name: &str) -> Self {
        Self {
            stop,
            logger,
            operation: Arc::from(format!("{unit_name}.run")),
        }
    }

    /// Polls the stop signal. Units should call this at a bounded interval
    /// and return promptly after observing `true`.
    pub fn should_stop(&self) -> bool {
        self.stop.get()
    }

    /// Completes once a stop has been requested; an alternative to polling
    /// for units built around `select!`.
    pub async fn stopped(&self) {
        self.stop.cancelled().await;
    }

    /// Reports progress as an informational entry in the supervisor's log.
    ///
    /// Fails with [`LogError::Disposed`] if the logger has been released.
    pub fn progress(&self, message: &str) -> Result<(), LogError> {
        self.logger.info(&self.operation, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{MemorySink, OrderedLogger};

    #[test]
    fn progress_lands_in_the_log_with_the_unit_operation() {
        let sink = MemorySink::new();
        let handle = sink.handle();
        let logger = Arc::new(OrderedLogger::new(Box::new(sink)));
        let ctx = WorkContext::new(Arc::new(StopSignal::new()), logger, "poller");

        ctx.progress("halfway").unwrap();

        let entries = handle.snapshot();
        assert_eq!(entries[0].operation, "poller.run");
        assert_eq!(entries[0].message, "halfway");
    }

    #[test]
    fn should_stop_tracks_the_signal() {
        let stop = Arc::new(StopSignal::new());
        let logger = Arc::new(OrderedLogger::new(Box::new(MemorySink::new())));
        let ctx = WorkContext::new(Arc::clone(&stop), logger, "poller");

        assert!(!ctx.should_stop());
        stop.set(true);
        assert!(ctx.should_stop());
    }
}
