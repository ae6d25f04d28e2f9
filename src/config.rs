//! Host configuration and restart policy.
//!
//! [`HostConfig`] bundles everything the supervisor resolves once at
//! construction: the [`RestartPolicy`] applied between work unit executions
//! and the identity of the log sink. Values are sourced externally (how they
//! are persisted is out of scope); [`HostConfig::from_settings`] consumes an
//! already-loaded string map and applies the documented fallbacks.
//!
//! ## Recognized keys
//! | key | effect |
//! |---|---|
//! | `WorkerThreadRestartDelay` | milliseconds to wait between a crash and the restart; default 3000 |
//! | `EventSource` | identifies where the ordered logger writes |
//!
//! A malformed restart delay falls back to the default rather than failing
//! startup.
//!
//! # Example
//! ```
//! use std::collections::HashMap;
//! use std::time::Duration;
//! use workhost::{HostConfig, RESTART_DELAY_KEY};
//!
//! let mut settings = HashMap::new();
//! settings.insert(RESTART_DELAY_KEY.to_string(), "500".to_string());
//!
//! let cfg = HostConfig::from_settings(&settings);
//! assert_eq!(cfg.restart.delay, Duration::from_millis(500));
//! ```

use std::collections::HashMap;
use std::time::Duration;

/// Settings key for the restart delay, in milliseconds.
pub const RESTART_DELAY_KEY: &str = "WorkerThreadRestartDelay";

/// Settings key for the log sink identity.
pub const EVENT_SOURCE_KEY: &str = "EventSource";

/// Delay applied when no setting (or a malformed one) is present.
const DEFAULT_RESTART_DELAY: Duration = Duration::from_millis(3000);

/// Policy controlling the pause between work unit executions.
///
/// The delay is fixed, not a backoff: every restart waits exactly `delay`,
/// measured from the moment the previous cycle ended. There is deliberately
/// no maximum-retry cap — a perpetually crashing unit is restarted forever
/// until a stop is requested (availability over fail-fast). `delay` is the
/// tuning point if that trade-off ever changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RestartPolicy {
    /// Wait between the end of one execution and the start of the next.
    pub delay: Duration,
}

impl Default for RestartPolicy {
    /// Returns the documented default: `delay = 3000ms`.
    fn default() -> Self {
        Self {
            delay: DEFAULT_RESTART_DELAY,
        }
    }
}

/// Immutable configuration for one supervisor instance.
///
/// Resolved once at construction; the controller routine never re-reads it.
#[derive(Clone, Debug)]
pub struct HostConfig {
    /// Restart policy applied after every execution, crash or clean return.
    pub restart: RestartPolicy,
    /// Identity of the sink the ordered logger writes to.
    pub event_source: String,
}

impl Default for HostConfig {
    /// Provides a default configuration:
    /// - `restart.delay = 3000ms`
    /// - `event_source = "workhost"`
    fn default() -> Self {
        Self {
            restart: RestartPolicy::default(),
            event_source: "workhost".to_string(),
        }
    }
}

impl HostConfig {
    /// Builds a configuration from an externally-loaded settings map.
    ///
    /// Missing or malformed values fall back to the defaults; startup never
    /// fails on a bad `WorkerThreadRestartDelay`.
    pub fn from_settings(settings: &HashMap<String, String>) -> Self {
        let delay = settings
            .get(RESTART_DELAY_KEY)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RESTART_DELAY);

        let event_source = settings
            .get(EVENT_SOURCE_KEY)
            .cloned()
            .unwrap_or_else(|| "workhost".to_string());

        Self {
            restart: RestartPolicy { delay },
            event_source,
        }
    }
}
