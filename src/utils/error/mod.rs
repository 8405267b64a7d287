//! Error Handling utilities
//!
//! This module provides the connector error taxonomy and the retry policy used
//! by the permission source adapter.

pub mod error;
pub mod recovery;

// Re-export commonly used types and functions
pub use error::*;
pub use recovery::*;
