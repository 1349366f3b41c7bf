//! Error types for the task server
//!
//! Provides unified error handling using thiserror. Cancelling the background
//! worker is not an error and never shows up here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == App Error Enum ==
/// Unified error type for the task server.
#[derive(Error, Debug)]
pub enum AppError {
    /// No route matches the request path
    #[error("Not found: {0}")]
    NotFound(String),

    /// An environment variable holds a value that cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the task server.
pub type Result<T> = std::result::Result<T, AppError>;
