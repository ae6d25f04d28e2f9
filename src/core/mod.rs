//! Runtime core: lifecycle orchestration.
//!
//! The only public API from this module is [`Supervisor`] (plus its
//! [`ServiceState`]). Internal modules:
//! - [`runner`]: executes one work unit cycle behind the crash isolation
//!   boundary;
//! - [`controller`]: the long-lived restart loop, one per supervisor;
//! - [`supervisor`]: state machine, stop plumbing, and the process-wide
//!   failure hook.

mod controller;
mod runner;
mod supervisor;

pub use supervisor::{ServiceState, Supervisor};
