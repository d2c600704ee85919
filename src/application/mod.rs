//! Application layer services implementing the shortening logic.
//!
//! Services consume the [`crate::domain::repositories::KvStore`] trait and
//! provide a small API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::id_generator::IdGenerator`] - Collision-checked random identifiers
//! - [`services::shortener_service::ShortenerService`] - Create and redirect operations

pub mod services;
