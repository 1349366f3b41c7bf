//! Response models for the task server API
//!
//! This module defines the DTOs (Data Transfer Objects) serialized into
//! HTTP response bodies. No endpoint takes a request body.

pub mod responses;

// Re-export commonly used types
pub use responses::{
    EndpointsMap, ErrorResponse, RootResponse, StartResponse, StatusResponse, StopResponse,
};
