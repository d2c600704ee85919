//! DTOs for the create endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRequest {
    /// The original URL. Only emptiness is checked here; the shortening
    /// service performs the full URL check.
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    #[serde(rename = "shortURL")]
    pub short_url: String,
}
