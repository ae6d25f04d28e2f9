//! Function-backed work unit (`WorkFn`).
//!
//! [`WorkFn`] wraps a closure `F: Fn(WorkContext) -> Fut`, producing a fresh
//! future per execution. Each cycle owns its own state; if executions need
//! shared state, capture an `Arc<...>` explicitly inside the closure.
//!
//! ## Example
//! ```
//! use workhost::{WorkError, WorkFn, WorkRef};
//!
//! let unit: WorkRef = WorkFn::arc("heartbeat", |ctx| async move {
//!     if ctx.should_stop() {
//!         return Ok(());
//!     }
//!     // do work...
//!     Ok::<_, WorkError>(())
//! });
//!
//! assert_eq!(unit.name(), "heartbeat");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::WorkError;
use crate::work::context::WorkContext;
use crate::work::unit::WorkUnit;

/// Function-backed work unit implementation.
///
/// Wraps a closure that *creates* a new future per execution.
#[derive(Debug)]
pub struct WorkFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> WorkFn<F> {
    /// Creates a new function-backed work unit.
    ///
    /// Prefer [`WorkFn::arc`] when you immediately need a
    /// [`WorkRef`](crate::WorkRef).
    pub fn new<Fut>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(WorkContext) -> Fut,
        Fut: Future<Output = Result<(), WorkError>>,
    {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the unit and returns it as a shared handle (`Arc<Self>`).
    pub fn arc<Fut>(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self>
    where
        F: Fn(WorkContext) -> Fut,
        Fut: Future<Output = Result<(), WorkError>>,
    {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> WorkUnit for WorkFn<F>
where
    F: Fn(WorkContext) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), WorkError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: WorkContext) -> Result<(), WorkError> {
        (self.f)(ctx).await
    }
}
