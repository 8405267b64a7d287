//! Shared utilities
//!
//! - **error**: error taxonomy and retry policy
//! - **logging**: tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{ConnectorError, RecordKind, Result, RetryConfig, RetryPolicy};
pub use logging::{LogFormat, init_logging};
