//! Response DTOs for the task server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::tasks::{StartOutcome, StatusReport, StopOutcome, TaskStatus};

/// Paths of the task control endpoints, as advertised by `GET /`
#[derive(Debug, Clone, Serialize)]
pub struct EndpointsMap {
    pub start: String,
    pub stop: String,
    pub status: String,
}

/// Response body for the root endpoint (GET /)
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    /// Service banner
    pub message: String,
    /// Where to start, stop and query the task
    pub endpoints: EndpointsMap,
}

impl RootResponse {
    /// Creates the static index response
    pub fn new() -> Self {
        Self {
            message: "Task switch API".to_string(),
            endpoints: EndpointsMap {
                start: "/start".to_string(),
                stop: "/stop".to_string(),
                status: "/status".to_string(),
            },
        }
    }
}

impl Default for RootResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for POST /start
#[derive(Debug, Clone, Serialize)]
pub struct StartResponse {
    /// `started` or `already_running`
    pub status: StartOutcome,
    /// Human readable outcome
    pub message: String,
}

impl From<StartOutcome> for StartResponse {
    fn from(status: StartOutcome) -> Self {
        let message = match status {
            StartOutcome::Started => "Background task started successfully",
            StartOutcome::AlreadyRunning => "Background task is already running",
        };
        Self {
            status,
            message: message.to_string(),
        }
    }
}

/// Response body for POST /stop
#[derive(Debug, Clone, Serialize)]
pub struct StopResponse {
    /// `stopped` or `not_running`
    pub status: StopOutcome,
    /// Human readable outcome
    pub message: String,
}

impl From<StopOutcome> for StopResponse {
    fn from(status: StopOutcome) -> Self {
        let message = match status {
            StopOutcome::Stopped => "Background task stopped successfully",
            StopOutcome::NotRunning => "Background task is not running",
        };
        Self {
            status,
            message: message.to_string(),
        }
    }
}

/// Response body for GET /status
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Derived lifecycle status
    pub status: TaskStatus,
    /// Raw running flag reported by the worker
    pub task_running: bool,
}

impl From<StatusReport> for StatusResponse {
    fn from(report: StatusReport) -> Self {
        Self {
            status: report.status,
            task_running: report.task_running,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
