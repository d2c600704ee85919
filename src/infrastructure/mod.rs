//! Infrastructure layer for external integrations.
//!
//! Implements the store contract defined by the domain layer.
//!
//! # Modules
//!
//! - [`store`] - Key-value store adapters (Redis and in-process)

pub mod store;
