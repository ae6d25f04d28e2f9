//! Run a single work unit execution behind the crash isolation boundary.
//!
//! Each cycle spawns the unit on its own task and awaits the join handle.
//! This is the single point where worker failures are caught: an `Err`
//! return surfaces as-is, a panic is recovered from the join error and
//! converted to [`WorkError::Panicked`]. Nothing propagates further — the
//! caller context is unambiguous, so no stack inspection is needed to label
//! the failure.

use crate::error::WorkError;
use crate::work::{WorkContext, WorkRef};

/// Executes one work unit cycle to completion, failure, or panic.
pub(crate) async fn run_once(unit: WorkRef, ctx: WorkContext) -> Result<(), WorkError> {
    let handle = tokio::spawn(async move { unit.run(ctx).await });

    match handle.await {
        Ok(result) => result,
        Err(join_err) if join_err.is_panic() => Err(WorkError::Panicked {
            error: panic_text(join_err.into_panic()),
        }),
        Err(_) => Err(WorkError::Fail {
            error: "execution task ended before completion".to_string(),
        }),
    }
}

/// Downcasts a panic payload to text where possible.
fn panic_text(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{MemorySink, OrderedLogger};
    use crate::signal::StopSignal;
    use crate::work::WorkFn;
    use std::sync::Arc;

    fn ctx() -> WorkContext {
        WorkContext::new(
            Arc::new(StopSignal::new()),
            Arc::new(OrderedLogger::new(Box::new(MemorySink::new()))),
            "unit-under-test",
        )
    }

    #[tokio::test]
    async fn clean_return_passes_through() {
        let unit: WorkRef = WorkFn::arc("ok", |_ctx| async { Ok::<(), WorkError>(()) });
        assert!(run_once(unit, ctx()).await.is_ok());
    }

    #[tokio::test]
    async fn error_return_passes_through() {
        let unit: WorkRef =
            WorkFn::arc("fails", |_ctx| async { Err(WorkError::fail("boom")) });
        let err = run_once(unit, ctx()).await.unwrap_err();
        assert_eq!(err.as_label(), "work_failed");
        assert!(err.as_message().contains("boom"));
    }

    #[tokio::test]
    async fn panic_is_caught_at_the_boundary() {
        let unit: WorkRef = WorkFn::arc("panics", |_ctx| async {
            panic!("worker exploded");
            #[allow(unreachable_code)]
            Ok::<(), WorkError>(())
        });
        let err = run_once(unit, ctx()).await.unwrap_err();
        assert_eq!(err.as_label(), "work_panicked");
        assert!(err.as_message().contains("worker exploded"));
    }
}
