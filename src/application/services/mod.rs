//! Business logic services for the application layer.

pub mod deadline;
pub mod id_generator;
pub mod shortener_service;

pub use deadline::bounded;
pub use id_generator::{AttemptBudget, IdGenerator};
pub use shortener_service::{ShortLink, ShortenerService, ShortenerSettings};
