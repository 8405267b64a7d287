//! Access to the OpenSearch security plugin
//!
//! [`PermissionSource`] is the seam between the connector and the cluster.
//! [`OpenSearchClient`] implements it over the REST API; tests substitute
//! the generated mock.

pub mod http;
pub mod models;
mod tls;

#[cfg(test)]
mod tests;

pub use http::{LEGACY_SECURITY_API_PATH, OpenSearchClient, SECURITY_API_PATH};
pub use models::{IndexPermission, Role, RoleMapping, TenantPermission, User};

use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only view of the security configuration of a cluster
///
/// Collections are returned sorted by record name. Lookups by name fail
/// with `ConnectorError::NotFound` when the record does not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionSource: Send + Sync {
    async fn get_roles(&self) -> Result<Vec<Role>>;

    async fn get_role(&self, name: &str) -> Result<Role>;

    async fn get_role_mappings(&self) -> Result<Vec<RoleMapping>>;

    async fn get_role_mapping(&self, name: &str) -> Result<RoleMapping>;

    async fn get_users(&self) -> Result<Vec<User>>;
}
