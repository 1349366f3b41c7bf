//! Periodic Worker
//!
//! The looping body driven by the [`TaskController`](super::TaskController).
//! It logs a timestamped message, then sleeps for the configured interval,
//! forever. The sleep is the only place cancellation is observed.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;

/// State the worker shares with its controller.
#[derive(Debug, Default)]
pub struct WorkerShared {
    /// Self-reported liveness of the worker
    running: AtomicBool,
    /// Total ticks emitted by every worker spawned from this controller
    ticks: AtomicU64,
}

impl WorkerShared {
    /// Current value of the running flag.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Total number of ticks emitted so far.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    #[cfg(test)]
    pub(crate) fn mark_running(&self) {
        self.running.store(true, Ordering::SeqCst);
    }

    pub(crate) fn clear_running(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Terminal value returned by a worker once it has stopped looping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerExit {
    /// Cancellation was observed at the suspend point
    Cancelled {
        /// Ticks emitted by this worker instance
        ticks: u64,
    },
}

/// Clears the running flag when the worker returns or unwinds.
struct RunningGuard<'a>(&'a WorkerShared);

impl<'a> RunningGuard<'a> {
    fn enter(shared: &'a WorkerShared) -> Self {
        shared.running.store(true, Ordering::SeqCst);
        Self(shared)
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.clear_running();
    }
}

/// Runs the tick loop until `cancel` fires.
///
/// Sets the shared running flag on entry. Each iteration emits one tick event
/// and then suspends for `interval`. The flag is cleared before this future
/// resolves, so anyone who observes the task as finished also observes
/// `running == false`.
pub async fn run_worker(
    interval: Duration,
    cancel: CancellationToken,
    shared: Arc<WorkerShared>,
) -> WorkerExit {
    let _guard = RunningGuard::enter(&shared);
    info!(
        interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
        "Looping function started"
    );

    let mut ticks: u64 = 0;

    loop {
        ticks += 1;
        shared.ticks.fetch_add(1, Ordering::SeqCst);
        info!(tick = ticks, "Test message at {}", chrono::Local::now().to_rfc3339());

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    info!(ticks, "Looping function stopped");
    WorkerExit::Cancelled { ticks }
}
