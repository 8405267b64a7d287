//! # opensearch-access-graph
//!
//! Re-expresses the OpenSearch security model as a normalized identity and
//! permission graph for access review tooling.
//!
//! Roles become resources that own entitlements: one per cluster permission,
//! one per distinct index permission, and one per assignment channel from
//! the role mapping. Role mappings become grants pointing at groups (backend
//! roles) or users, annotated so that a downstream engine can expand each
//! grant to the Role's permission entitlements. Every id is content
//! addressed, so the same security configuration always yields the same
//! graph.
//!
//! ## Library use
//!
//! ```rust,no_run
//! use opensearch_access_graph::{Config, Connector};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/connector.yaml").await?;
//!     let connector = Connector::new(config.connector).await?;
//!     let report = connector.sync().await?;
//!
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod connector;
pub mod core;
pub mod utils;

pub use client::{OpenSearchClient, PermissionSource};
pub use config::{Config, ConfigOverrides, ConnectorConfig};
pub use connector::{Connector, SyncReport};
pub use crate::core::{
    Entitlement, EntitlementKind, ExternalMatcher, Grant, GrantTarget, PassContext, Resource,
    ResourceId, ResourceType, SynthesisError, UserMatchKey, synthesize_entitlements,
    synthesize_grants,
};
pub use utils::error::{ConnectorError, Result};

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
pub const NAME: &str = env!("CARGO_PKG_NAME");
