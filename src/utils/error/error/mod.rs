//! Error handling for the connector
//!
//! This module defines the error taxonomy shared by the permission source
//! adapter, the synthesis engine and the sync-pass orchestrator.

#![allow(missing_docs)]

mod conversions;
mod helpers;
mod types;

pub use types::{ConnectorError, RecordKind, Result};
