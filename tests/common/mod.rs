//! Common test utilities
//!
//! [`MockCluster`] serves the security API from in-memory records so the
//! public API can be exercised end to end.

pub mod fixtures;

pub use fixtures::{MockCluster, analyst_cluster};
