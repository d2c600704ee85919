//! Domain layer containing the identifier model and the store contract.
//!
//! Nothing in here depends on HTTP, Redis or configuration loading.
//!
//! # Architecture
//!
//! - [`short_id`] - The short identifier type and its alphabet
//! - [`entities`] - The URL mapping persisted by the store
//! - [`repositories`] - The key-value store trait implemented by the infrastructure layer

pub mod entities;
pub mod repositories;
pub mod short_id;

pub use short_id::ShortId;
