//! Short identifier type.

use std::fmt;

/// The 62 symbols an identifier may be drawn from.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Longest identifier accepted on lookup.
pub const MAX_LENGTH: usize = 32;

/// Identifiers that would shadow a service route.
pub const RESERVED: &[&str] = &["create", "health", "metrics"];

/// Largest byte value that maps onto the alphabet without bias (4 * 62).
const UNBIASED_LIMIT: u8 = 248;

/// A compact token standing in for a full URL.
///
/// Always non-empty and made of [`ALPHABET`] symbols only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortId(String);

impl ShortId {
    /// Draws a fresh identifier of `length` symbols from the OS random source.
    ///
    /// Random bytes are rejection-sampled so that every symbol is uniform
    /// over the alphabet.
    ///
    /// # Panics
    ///
    /// Panics if the operating system random number generator fails. Falling
    /// back to a weaker source would make identifiers predictable.
    pub fn random(length: usize) -> Self {
        let mut id = String::with_capacity(length);
        let mut buffer = [0u8; 32];

        while id.len() < length {
            getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

            for byte in buffer {
                if byte >= UNBIASED_LIMIT {
                    continue;
                }
                id.push(ALPHABET[usize::from(byte % 62)] as char);
                if id.len() == length {
                    break;
                }
            }
        }

        Self(id)
    }

    /// Parses an identifier received from a caller.
    ///
    /// Returns `None` for anything that could never have been generated:
    /// empty input, more than [`MAX_LENGTH`] symbols, or symbols outside the alphabet.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || raw.len() > MAX_LENGTH {
            return None;
        }
        if !raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    /// Whether this identifier collides with a route the service owns.
    pub fn is_reserved(&self) -> bool {
        RESERVED.contains(&self.0.as_str())
    }

    /// Composes the public short URL under `base_url`.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
