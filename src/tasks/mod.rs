//! Background Tasks Module
//!
//! Lifecycle management for the single cancellable background task.
//!
//! # Components
//! - Task Controller: start/stop/status with at most one active worker
//! - Periodic Worker: logs a timestamped message every tick until cancelled

mod controller;
mod worker;


pub use controller::{
    SlotState, StartOutcome, StatusReport, StopOutcome, TaskController, TaskStatus,
};
pub use worker::{run_worker, WorkerExit, WorkerShared};
