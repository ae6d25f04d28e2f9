//! The work unit contract.
//!
//! A [`WorkUnit`] is any operation that (a) runs until it naturally completes
//! or fails, (b) polls the stop signal at a bounded interval of its own
//! choosing and returns promptly after observing it, and (c) may emit
//! progress entries through the context it is handed at launch. The
//! supervisor makes no assumptions beyond this contract.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::WorkError;
use crate::work::context::WorkContext;

/// Shared handle to a work unit.
pub type WorkRef = Arc<dyn WorkUnit>;

/// # Caller-supplied unit of business logic.
///
/// Executed by the supervisor once per cycle, never concurrently with another
/// execution from the same supervisor. Implementations should check
/// [`WorkContext::should_stop`] (or await [`WorkContext::stopped`]) at their
/// own cadence and exit promptly once it observes a stop.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use workhost::{WorkContext, WorkError, WorkUnit};
///
/// struct Drainer;
///
/// #[async_trait]
/// impl WorkUnit for Drainer {
///     fn name(&self) -> &str {
///         "drainer"
///     }
///
///     async fn run(&self, ctx: WorkContext) -> Result<(), WorkError> {
///         while !ctx.should_stop() {
///             // drain one batch...
///             ctx.progress("batch drained")?;
///             tokio::time::sleep(std::time::Duration::from_millis(50)).await;
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait WorkUnit: Send + Sync + 'static {
    /// Returns a stable, human-readable unit name.
    fn name(&self) -> &str;

    /// Executes the unit until completion, failure, or an observed stop.
    async fn run(&self, ctx: WorkContext) -> Result<(), WorkError>;
}
