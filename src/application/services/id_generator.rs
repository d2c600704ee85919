//! Collision-checked identifier generation.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::deadline::bounded;
use crate::domain::ShortId;
use crate::domain::repositories::KvStore;
use crate::error::AppError;

/// Number of candidates a single allocation may still draw.
///
/// One budget is shared by every step of an allocation, so a caller that
/// re-enters the generator after losing an insert race cannot exceed the
/// configured limit.
#[derive(Debug)]
pub struct AttemptBudget {
    remaining: u32,
}

impl AttemptBudget {
    pub fn new(attempts: u32) -> Self {
        Self {
            remaining: attempts,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    fn take(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Produces identifiers that are not present in the store at generation time.
///
/// Each candidate is a whole new random identifier. A candidate is rejected
/// when the store already holds it or when it shadows a service route.
pub struct IdGenerator {
    store: Arc<dyn KvStore>,
    length: usize,
    max_attempts: u32,
    store_timeout: Duration,
}

impl IdGenerator {
    pub fn new(
        store: Arc<dyn KvStore>,
        length: usize,
        max_attempts: u32,
        store_timeout: Duration,
    ) -> Self {
        Self {
            store,
            length,
            max_attempts,
            store_timeout,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns a free identifier using a fresh attempt budget.
    ///
    /// # Errors
    ///
    /// - [`AppError::CapacityExhausted`] after `max_attempts` taken candidates
    /// - [`AppError::StorageFailure`] / [`AppError::StorageTimeout`] if an existence check fails
    pub async fn generate(&self) -> Result<ShortId, AppError> {
        let mut budget = AttemptBudget::new(self.max_attempts);
        self.generate_within(&mut budget).await
    }

    /// Returns a free identifier, drawing candidates from `budget`.
    ///
    /// # Errors
    ///
    /// See [`Self::generate`].
    pub async fn generate_within(&self, budget: &mut AttemptBudget) -> Result<ShortId, AppError> {
        while budget.take() {
            let candidate = ShortId::random(self.length);

            if candidate.is_reserved() {
                debug!(id = %candidate, "Generated reserved identifier, drawing again");
                continue;
            }

            if !bounded(self.store_timeout, self.store.exists(candidate.as_str())).await? {
                return Ok(candidate);
            }

            debug!(
                id = %candidate,
                remaining = budget.remaining(),
                "Identifier collision"
            );
        }

        warn!(
            attempts = self.max_attempts,
            length = self.length,
            "Identifier space saturated, giving up"
        );

        Err(AppError::CapacityExhausted {
            attempts: self.max_attempts,
        })
    }
}
