//! Observability: log subscriber setup and request/response counters.

pub mod logging;
pub mod recorder;

pub use recorder::{EventType, record_request, record_response};
