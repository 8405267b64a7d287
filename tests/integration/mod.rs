//! Integration tests for opensearch-access-graph
//!
//! These tests drive the public API against a mocked cluster.

pub mod config_tests;
pub mod determinism_tests;
pub mod sync_tests;
