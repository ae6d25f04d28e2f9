//! Work unit abstractions.
//!
//! This module provides the contract consumed by the supervisor:
//! - [`WorkUnit`] — trait for the caller-supplied unit of business logic
//! - [`WorkFn`] — function-backed implementation
//! - [`WorkRef`] — shared handle (`Arc<dyn WorkUnit>`)
//! - [`WorkContext`] — per-execution view: stop polling + progress reporting

mod context;
mod unit;
mod work_fn;

pub use context::WorkContext;
pub use unit::{WorkRef, WorkUnit};
pub use work_fn::WorkFn;
