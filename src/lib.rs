//! Task Switch - HTTP control over a single background task
//!
//! Starts, stops and reports on one cancellable periodic worker, with at most
//! one instance alive at a time and a shutdown hook for the hosting server.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::AppError;
pub use tasks::TaskController;
