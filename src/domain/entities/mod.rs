//! Domain entities.

pub mod mapping;

pub use mapping::UrlMapping;
