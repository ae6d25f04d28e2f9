//! Cooperative stop signal shared between the controller and the supervisor.
//!
//! [`StopSignal`] is the single source of truth for "should this service be
//! stopping now". It is a boolean behind a mutex — an explicit guarded
//! critical section rather than a lock-free atomic, to keep the concurrency
//! model simple and auditable — paired with a cancellation token so timed
//! waits on the flag are interruptible instead of polled.
//!
//! ## Rules
//! - Once raised, the latch never resets within one supervisor lifetime:
//!   `set(false)` after `set(true)` is a no-op.
//! - `get`/`set` are mutually exclusive; critical sections are O(1) and never
//!   block indefinitely.
//! - A write that returns is visible to every subsequent read; the guard
//!   provides the visibility, no separate fence is needed.

use std::sync::Mutex;

use tokio_util::sync::CancellationToken;

/// Mutex-guarded stop latch with an awaitable cancellation side.
///
/// Writers: the external controller (stop/shutdown requests) and the
/// supervisor during teardown. Readers: the controller routine between
/// cycles and work unit implementations on every poll.
#[derive(Debug, Default)]
pub struct StopSignal {
    flag: Mutex<bool>,
    token: CancellationToken,
}

impl StopSignal {
    /// Creates a new, unraised signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the current value of the flag.
    pub fn get(&self) -> bool {
        *self.lock()
    }

    /// Writes the flag, honoring the latch invariant.
    ///
    /// Setting `true` cancels the token so interruptible sleeps wake up.
    /// Setting `false` once the latch is raised is ignored. Returns `true`
    /// if this call changed the observable value, which lets callers make
    /// stop requests idempotent (log once, not per call).
    pub fn set(&self, value: bool) -> bool {
        let mut flag = self.lock();
        if *flag == value || (*flag && !value) {
            return false;
        }
        *flag = value;
        if value {
            self.token.cancel();
        }
        true
    }

    /// Completes once the latch has been raised.
    ///
    /// Used by the controller routine to turn its restart delay into an
    /// interruptible timed wait (`select!` over this and a sleep).
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }

    /// A panic while holding the guard must not wedge the latch; the bool is
    /// valid regardless, so poisoning is recovered rather than propagated.
    fn lock(&self) -> std::sync::MutexGuard<'_, bool> {
        self.flag
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
