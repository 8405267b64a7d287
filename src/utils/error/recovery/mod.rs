//! Error recovery utilities
//!
//! Retry with exponential backoff for the permission source adapter. The
//! synthesis engine never retries; only transport-level failures are repeated.

mod retry;
mod types;

pub use retry::RetryPolicy;
pub use types::RetryConfig;
