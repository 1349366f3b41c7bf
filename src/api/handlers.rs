//! API Handlers
//!
//! HTTP request handlers mapping each route onto the task controller.

use std::sync::Arc;

use axum::{extract::State, http::Uri, Json};

use crate::config::Config;
use crate::error::AppError;
use crate::models::{RootResponse, StartResponse, StatusResponse, StopResponse};
use crate::tasks::TaskController;

/// Application state shared across all handlers.
///
/// Holds the one task controller for the process.
#[derive(Clone)]
pub struct AppState {
    /// Controller of the background task slot
    pub controller: Arc<TaskController>,
}

impl AppState {
    /// Creates a new AppState around the given controller.
    pub fn new(controller: TaskController) -> Self {
        Self {
            controller: Arc::new(controller),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(TaskController::new(config.tick_interval()))
    }
}

/// Handler for GET /
///
/// Lists the task control endpoints.
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse::new())
}

/// Handler for POST /start
pub async fn start_handler(State(state): State<AppState>) -> Json<StartResponse> {
    Json(state.controller.start().await.into())
}

/// Handler for POST /stop
///
/// Returns once the worker has acknowledged cancellation.
pub async fn stop_handler(State(state): State<AppState>) -> Json<StopResponse> {
    Json(state.controller.stop().await.into())
}

/// Handler for GET /status
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(state.controller.status().await.into())
}

/// Fallback for unknown routes
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
