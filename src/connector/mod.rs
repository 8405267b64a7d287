//! Connector
//!
//! Ties the permission source to the synthesis engine. [`Connector`] is the
//! entry point used by the binary: it declares resource types, runs sync
//! passes and checks connectivity.

pub mod resource_types;
pub mod roles;
pub mod sync;
pub mod users;

pub use resource_types::resource_types;
pub use roles::{RoleBuilder, RoleGraph, role_resource};
pub use sync::{RoleFailure, RoleSyncResult, SyncOptions, SyncPass, SyncReport, SyncSummary};
pub use users::{UserBuilder, user_resource};

use crate::client::{OpenSearchClient, PermissionSource};
use crate::config::ConnectorConfig;
use crate::core::ResourceType;
use crate::utils::error::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Result of a connectivity check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub address: String,
    pub security_api_path: Option<String>,
    pub roles: usize,
}

pub struct Connector {
    source: Arc<dyn PermissionSource>,
    config: ConnectorConfig,
    api_path: Option<String>,
}

impl Connector {
    /// Connect to the cluster described by `config`
    pub async fn new(config: ConnectorConfig) -> Result<Self> {
        let client = OpenSearchClient::connect(&config).await?;
        let api_path = Some(client.api_path().to_string());
        Ok(Self {
            source: Arc::new(client),
            config,
            api_path,
        })
    }

    /// Use an existing permission source
    pub fn with_source(source: Arc<dyn PermissionSource>, config: ConnectorConfig) -> Self {
        Self {
            source,
            config,
            api_path: None,
        }
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    pub fn resource_types(&self) -> Vec<ResourceType> {
        resource_types()
    }

    /// Run one full sync pass
    pub async fn sync(&self) -> Result<SyncReport> {
        let options = SyncOptions {
            user_match_key: self.config.user_match_key,
            match_internal_users: self.config.match_internal_users,
            concurrency: self.config.sync.concurrency,
        };
        SyncPass::new(self.source.clone(), options).run().await
    }

    /// Verify the credentials by listing roles
    pub async fn check(&self) -> Result<CheckReport> {
        let roles = self.source.get_roles().await?;
        info!(roles = roles.len(), "Connectivity check passed");
        Ok(CheckReport {
            address: self.config.address.clone(),
            security_api_path: self.api_path.clone(),
            roles: roles.len(),
        })
    }
}
