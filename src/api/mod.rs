//! API Module
//!
//! HTTP handlers and routing for the task server REST API.
//!
//! # Endpoints
//! - `GET /` - List the control endpoints
//! - `POST /start` - Start the background task
//! - `POST /stop` - Stop the background task
//! - `GET /status` - Report the task status

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
