//! Short link creation and redirect resolution.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use super::deadline::bounded;
use super::id_generator::{AttemptBudget, IdGenerator};
use crate::config::Config;
use crate::domain::ShortId;
use crate::domain::entities::UrlMapping;
use crate::domain::repositories::KvStore;
use crate::error::AppError;

/// Longest original URL accepted for shortening.
pub const MAX_URL_LENGTH: usize = 2048;

/// Tunables for [`ShortenerService`], usually derived from [`Config`].
#[derive(Debug, Clone)]
pub struct ShortenerSettings {
    pub base_url: String,
    pub id_length: usize,
    pub max_attempts: u32,
    pub store_timeout: Duration,
}

impl From<&Config> for ShortenerSettings {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            id_length: config.id_length,
            max_attempts: config.id_max_attempts,
            store_timeout: Duration::from_millis(config.store_timeout_ms),
        }
    }
}

/// Result of a successful create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: ShortId,
    pub short_url: String,
}

/// Turns URLs into durable mappings and resolves identifiers back.
///
/// Holds no mapping state of its own; every mapping lives in the store.
pub struct ShortenerService {
    store: Arc<dyn KvStore>,
    generator: IdGenerator,
    base_url: String,
    store_timeout: Duration,
}

impl ShortenerService {
    pub fn new(
        store: Arc<dyn KvStore>,
        generator: IdGenerator,
        base_url: impl Into<String>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            store,
            generator,
            base_url: base_url.into(),
            store_timeout,
        }
    }

    /// Builds the service and its generator over a shared store handle.
    pub fn from_settings(store: Arc<dyn KvStore>, settings: &ShortenerSettings) -> Self {
        let generator = IdGenerator::new(
            store.clone(),
            settings.id_length,
            settings.max_attempts,
            settings.store_timeout,
        );
        Self::new(
            store,
            generator,
            settings.base_url.clone(),
            settings.store_timeout,
        )
    }

    /// Creates exactly one mapping for `original_url` and returns its short URL.
    ///
    /// The identifier is claimed with an atomic insert-if-absent write. If a
    /// concurrent request claims the same identifier between the existence
    /// check and the write, allocation starts over on the same attempt budget.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if the URL is blank or malformed (no identifier is drawn)
    /// - [`AppError::CapacityExhausted`] if no free identifier was found within budget
    /// - [`AppError::StorageFailure`] / [`AppError::StorageTimeout`] on store errors
    pub async fn create(&self, original_url: &str) -> Result<ShortLink, AppError> {
        validate_original_url(original_url)?;

        let mut budget = AttemptBudget::new(self.generator.max_attempts());

        loop {
            let id = self.generator.generate_within(&mut budget).await?;
            let mapping = UrlMapping::new(id, original_url);

            let claimed = bounded(
                self.store_timeout,
                self.store
                    .insert_if_absent(mapping.key(), &mapping.original_url),
            )
            .await?;

            if claimed {
                let short_url = mapping.id.to_url(&self.base_url);
                info!(id = %mapping.id, url = %mapping.original_url, "Short link created");
                return Ok(ShortLink {
                    id: mapping.id,
                    short_url,
                });
            }

            warn!(id = %mapping.id, "Identifier claimed concurrently, allocating another");
        }
    }

    /// Resolves `raw_id` to the original URL.
    ///
    /// Identifiers that could never have been generated are rejected without
    /// a store round-trip. A stored empty value is treated as absent.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no usable mapping exists
    /// - [`AppError::StorageFailure`] / [`AppError::StorageTimeout`] on store errors
    pub async fn resolve(&self, raw_id: &str) -> Result<String, AppError> {
        let Some(id) = ShortId::parse(raw_id) else {
            debug!(id = raw_id, "Rejected malformed identifier");
            return Err(AppError::not_found(raw_id));
        };

        match bounded(self.store_timeout, self.store.get(id.as_str())).await? {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(AppError::not_found(id.as_str())),
        }
    }
}

/// Checks that `raw` is an absolute http(s) URL worth spending an identifier on.
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] describing the first violated rule.
pub fn validate_original_url(raw: &str) -> Result<(), AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::invalid_input("url must not be empty"));
    }

    if raw.chars().count() > MAX_URL_LENGTH {
        return Err(AppError::invalid_input(format!(
            "url must be at most {MAX_URL_LENGTH} characters"
        )));
    }

    if raw.trim() != raw {
        return Err(AppError::invalid_input(
            "url must not have surrounding whitespace",
        ));
    }

    // Stored verbatim and replayed in a Location header; the url parser
    // strips or escapes these, so it cannot catch them.
    if raw.chars().any(char::is_control) {
        return Err(AppError::invalid_input(
            "url must not contain control characters",
        ));
    }

    let parsed = Url::parse(raw).map_err(|e| AppError::invalid_input(format!("url: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::invalid_input(
            "only http and https urls can be shortened",
        ));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(AppError::invalid_input("url must have a host"));
    }

    Ok(())
}
