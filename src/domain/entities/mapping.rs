//! URL mapping entity.

use crate::domain::ShortId;

/// The durable association between a short identifier and an original URL.
///
/// Created once by the shortening service and never mutated afterwards.
/// The store owns it; the service keeps no in-memory copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub id: ShortId,
    pub original_url: String,
}

impl UrlMapping {
    pub fn new(id: ShortId, original_url: impl Into<String>) -> Self {
        Self {
            id,
            original_url: original_url.into(),
        }
    }

    /// Store key for this mapping.
    pub fn key(&self) -> &str {
        self.id.as_str()
    }
}
