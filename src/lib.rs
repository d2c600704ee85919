//! # KV Shortener
//!
//! A URL shortener that maps long URLs to short random identifiers kept in a
//! Redis key-value store, and redirects identifiers back to their URLs.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Identifier type, URL mapping and the store trait
//! - **Application Layer** ([`application`]) - Identifier generation and the shortening service
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory store adapters
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs and middleware
//!
//! ## Identifier allocation
//!
//! Identifiers are drawn from a 62-symbol alphabet using the OS random source,
//! checked for existence, and claimed with an atomic insert-if-absent write.
//! Every allocation draws at most `ID_MAX_ATTEMPTS` candidates before failing
//! with [`AppError::CapacityExhausted`].
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"
//! export BASE_URL="http://localhost:8081"
//! cargo run
//!
//! curl -X POST localhost:8081/create -d '{"url":"https://example.com/a"}' \
//!      -H 'content-type: application/json'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod telemetry;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::application::services::{IdGenerator, ShortLink, ShortenerService};
    pub use crate::domain::ShortId;
    pub use crate::domain::entities::UrlMapping;
    pub use crate::domain::repositories::{KvStore, StoreError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{MemoryStore, RedisStore};
    pub use crate::state::AppState;
}
