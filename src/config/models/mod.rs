//! Configuration data models
//!
//! This module defines all configuration structures used by the connector.

pub mod connector;
pub mod http;
pub mod sync;

pub use connector::*;
pub use http::*;
pub use sync::*;

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum retry attempts after the first request
pub fn default_max_retries() -> u32 {
    3
}

/// Default base delay between retries in milliseconds
pub fn default_retry_base_delay_ms() -> u64 {
    500
}

/// Default cap on the delay between retries in milliseconds
pub fn default_retry_max_delay_ms() -> u64 {
    10_000
}

/// Default user agent
pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Default number of roles processed concurrently
pub fn default_concurrency() -> usize {
    8
}
