//! Task Controller
//!
//! Owns the single background task slot and exposes start/stop/status with
//! at-most-one-instance semantics, plus a shutdown hook for the hosting
//! process.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::worker::{run_worker, WorkerExit, WorkerShared};

/// Result of [`TaskController::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

/// Result of [`TaskController::stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopOutcome {
    Stopped,
    NotRunning,
}

/// Derived lifecycle status of the task slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    NotStarted,
    Stopped,
    Running,
    /// The task exists but its worker has not reported itself running yet
    Unknown,
}

/// What the slot holds, as seen by a status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Active,
    Finished,
}

impl TaskStatus {
    /// Applies the status rules in order; the first match wins.
    pub fn derive(slot: SlotState, running: bool) -> Self {
        match slot {
            SlotState::Empty => TaskStatus::NotStarted,
            SlotState::Finished => TaskStatus::Stopped,
            SlotState::Active if running => TaskStatus::Running,
            SlotState::Active => TaskStatus::Unknown,
        }
    }
}

/// Snapshot returned by [`TaskController::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    pub status: TaskStatus,
    pub task_running: bool,
}

/// Handle to one spawned worker.
#[derive(Debug)]
struct TaskHandle {
    cancel: CancellationToken,
    join: JoinHandle<WorkerExit>,
}

impl TaskHandle {
    fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Signals cancellation and waits for the worker to acknowledge it.
    ///
    /// Must only be called on a handle that has not finished: a completed
    /// `JoinHandle` cannot be polled again.
    async fn cancel_and_wait(&mut self, shared: &WorkerShared) {
        self.cancel.cancel();

        match (&mut self.join).await {
            Ok(WorkerExit::Cancelled { ticks }) => {
                info!(ticks, "Background task acknowledged cancellation");
            }
            Err(e) if e.is_panic() => {
                error!(error = %e, "Background task panicked");
                shared.clear_running();
            }
            Err(e) => {
                error!(error = %e, "Background task ended abnormally");
                shared.clear_running();
            }
        }
    }
}

/// Controls the single cancellable background task.
///
/// Cheap to share behind an `Arc`; every entry point takes `&self`.
#[derive(Debug)]
pub struct TaskController {
    tick_interval: Duration,
    slot: Mutex<Option<TaskHandle>>,
    shared: Arc<WorkerShared>,
}

impl TaskController {
    /// Creates a controller whose workers tick every `tick_interval`.
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            slot: Mutex::new(None),
            shared: Arc::new(WorkerShared::default()),
        }
    }

    /// Spawns a worker unless one is already active.
    ///
    /// Never blocks on the worker itself.
    pub async fn start(&self) -> StartOutcome {
        let mut slot = self.slot.lock().await;

        if slot.as_ref().is_some_and(|handle| !handle.is_finished()) {
            info!("Start requested but background task is already running");
            return StartOutcome::AlreadyRunning;
        }

        let cancel = CancellationToken::new();
        let join = tokio::spawn(run_worker(
            self.tick_interval,
            cancel.clone(),
            Arc::clone(&self.shared),
        ));
        *slot = Some(TaskHandle { cancel, join });

        info!(
            interval_ms = u64::try_from(self.tick_interval.as_millis()).unwrap_or(u64::MAX),
            "Background task started"
        );
        StartOutcome::Started
    }

    /// Cancels the active worker and waits until it has stopped.
    ///
    /// The finished handle stays in the slot so later status queries report
    /// `stopped` rather than `not_started`.
    pub async fn stop(&self) -> StopOutcome {
        let mut slot = self.slot.lock().await;

        match slot.as_mut() {
            Some(handle) if !handle.is_finished() => {
                handle.cancel_and_wait(&self.shared).await;
                info!("Background task stopped");
                StopOutcome::Stopped
            }
            _ => {
                info!("Stop requested but no background task is running");
                StopOutcome::NotRunning
            }
        }
    }

    /// Reports the derived status and the raw running flag.
    pub async fn status(&self) -> StatusReport {
        let slot = self.slot.lock().await;

        let slot_state = match slot.as_ref() {
            None => SlotState::Empty,
            Some(handle) if handle.is_finished() => SlotState::Finished,
            Some(_) => SlotState::Active,
        };
        // Read after the completion check: the worker clears the flag before
        // its task completes.
        let running = self.shared.is_running();

        StatusReport {
            status: TaskStatus::derive(slot_state, running),
            task_running: running,
        }
    }

    /// Teardown hook for the hosting process.
    ///
    /// Cancels any active worker and waits for it, so no loop outlives the
    /// server. Safe to call with no task and safe to call twice.
    pub async fn shutdown(&self) {
        let mut slot = self.slot.lock().await;

        if let Some(handle) = slot.as_mut().filter(|handle| !handle.is_finished()) {
            info!("Cancelling background task for shutdown");
            handle.cancel_and_wait(&self.shared).await;
        }
    }

    /// Total number of tick events emitted by workers of this controller.
    pub fn ticks(&self) -> u64 {
        self.shared.ticks()
    }
}
