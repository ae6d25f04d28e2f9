//! The controller routine: one long-lived loop per supervisor.
//!
//! Runs once per `start`, never re-entered. Drives the
//! start → run → (crash → delay → restart)* → stop lifecycle:
//!
//! ```text
//! loop while stop latch is down {
//!   ├─► run_once(unit) — spawn, await, absorb failure
//!   │       ├─ Err        → logger.error(label, message)
//!   │       ├─ Ok + stop  → cooperative exit, loop breaks
//!   │       └─ Ok         → logger.warn (anomalous clean return, restart)
//!   ├─► re-check latch, exit if raised
//!   ├─► logger: "pausing before restart"
//!   └─► select! { sleep(restart delay), stop.cancelled() }
//! }
//! logger: "stopping" → dispose logger → state = Stopped
//! ```
//!
//! ## Rules
//! - Exactly one work unit execution is in flight at any time.
//! - The restart delay is a fixed wait from the moment the previous cycle
//!   ended; it is interruptible by the stop latch, never a busy-poll.
//! - Worst-case stop latency: one work unit poll interval plus one full
//!   restart delay when the stop lands just after the latch re-check.

use std::sync::Arc;

use tokio::{select, time};

use crate::core::runner::run_once;
use crate::core::supervisor::{ServiceState, Shared};
use crate::work::WorkContext;

const OP: &str = "controller";

pub(crate) async fn run(shared: Arc<Shared>) {
    shared.enter_running();

    while !shared.stop.get() {
        let ctx = WorkContext::new(
            Arc::clone(&shared.stop),
            Arc::clone(&shared.logger),
            shared.work.name(),
        );
        let _ = shared
            .logger
            .info(OP, &format!("launching work unit '{}'", shared.work.name()));

        let result = run_once(Arc::clone(&shared.work), ctx).await;

        match result {
            Ok(()) if shared.stop.get() => {
                let _ = shared
                    .logger
                    .info(OP, "work unit observed the stop request and returned");
            }
            Ok(()) => {
                let _ = shared.logger.warn(
                    OP,
                    "work unit returned without a stop request; scheduling restart",
                );
            }
            Err(failure) => {
                let _ = shared.logger.error(
                    OP,
                    &format!("{}: {}", failure.as_label(), failure.as_message()),
                );
            }
        }

        if shared.stop.get() {
            break;
        }

        let delay = shared.policy.delay;
        let _ = shared
            .logger
            .info(OP, &format!("pausing {delay:?} before restart"));

        let sleep = time::sleep(delay);
        tokio::pin!(sleep);
        select! {
            _ = &mut sleep => {}
            _ = shared.stop.cancelled() => break,
        }
    }

    let _ = shared.logger.info(OP, "stopping");
    shared.logger.dispose();
    shared.set_state(ServiceState::Stopped);
}
