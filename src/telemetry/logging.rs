//! Tracing subscriber initialisation.

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `level` is an `EnvFilter` directive string such as `info` or
/// `kv_shortener=debug,tower_http=info`; an unparsable value falls back to
/// `info`. `format` selects `json` output, anything else is human-readable text.
///
/// # Panics
///
/// Panics if a global subscriber was already installed.
pub fn init(level: &str, format: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
