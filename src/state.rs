//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{ShortenerService, ShortenerSettings};
use crate::domain::repositories::KvStore;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
    /// Shared store handle, used directly only by the health check.
    pub store: Arc<dyn KvStore>,
    pub store_timeout: Duration,
}

impl AppState {
    /// Wires the shortening service over `store`.
    pub fn new(store: Arc<dyn KvStore>, settings: &ShortenerSettings) -> Self {
        let shortener = Arc::new(ShortenerService::from_settings(store.clone(), settings));

        Self {
            shortener,
            store,
            store_timeout: settings.store_timeout,
        }
    }
}
