//! HTTP layer translating requests into shortening operations.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies
//! - [`handlers`] - Create, redirect and health handlers
//! - [`middleware`] - Request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
