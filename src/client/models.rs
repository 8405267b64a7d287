//! Security API record models
//!
//! Collection endpoints return objects keyed by record name, so `name` is
//! filled in by the client after decoding.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Security role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub reserved: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cluster_permissions: Vec<String>,
    #[serde(default)]
    pub index_permissions: Vec<IndexPermission>,
    #[serde(default)]
    pub tenant_permissions: Vec<TenantPermission>,
}

impl Role {
    /// Whether the role implies at least one cluster or index entitlement
    pub fn has_permissions(&self) -> bool {
        !self.cluster_permissions.is_empty()
            || self
                .index_permissions
                .iter()
                .any(|block| !block.allowed_actions.is_empty())
    }
}

/// Index permission block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexPermission {
    #[serde(default)]
    pub index_patterns: Vec<String>,
    #[serde(default)]
    pub fls: Vec<String>,
    #[serde(default)]
    pub masked_fields: Vec<String>,
    #[serde(default)]
    pub allowed_actions: Vec<String>,
}

/// Tenant permission block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantPermission {
    #[serde(default)]
    pub tenant_patterns: Vec<String>,
    #[serde(default)]
    pub allowed_actions: Vec<String>,
}

/// Association of a role with the principals that hold it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleMapping {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub reserved: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub backend_roles: Vec<String>,
    #[serde(default)]
    pub hosts: Vec<String>,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub and_backend_roles: Vec<String>,
}

/// Internal user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reserved: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub backend_roles: Vec<String>,
    #[serde(default)]
    pub opendistro_security_roles: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}
