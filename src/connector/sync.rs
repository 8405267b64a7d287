//! Sync pass orchestration

use super::resource_types::resource_types;
use super::roles::{RoleBuilder, RoleGraph, role_resource};
use super::users::{UserBuilder, user_resource};
use crate::client::PermissionSource;
use crate::core::{
    Entitlement, ExternalMatcher, Grant, PassContext, Resource, ResourceId, ResourceType,
    UserMatchKey,
};
use crate::utils::error::{ConnectorError, Result};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Entitlements and grants produced for one Role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSyncResult {
    pub role: ResourceId,
    pub entitlements: Vec<Entitlement>,
    pub grants: Vec<Grant>,
}

/// A Role whose processing failed; other Roles are unaffected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFailure {
    pub role: String,
    pub code: String,
    pub message: String,
}

impl RoleFailure {
    fn new(role: String, error: &ConnectorError) -> Self {
        Self {
            role,
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub roles: usize,
    pub users: usize,
    pub entitlements: usize,
    pub grants: usize,
    pub failed_roles: usize,
    pub duration_ms: u64,
}

/// Output of one sync pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    pub resource_types: Vec<ResourceType>,
    /// Roles first, then users, each sorted by name
    pub resources: Vec<Resource>,
    /// Sorted by role name
    pub roles: Vec<RoleSyncResult>,
    /// Sorted by role name
    pub failures: Vec<RoleFailure>,
    pub summary: SyncSummary,
}

impl SyncReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Options for a pass
#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    pub user_match_key: UserMatchKey,
    pub match_internal_users: bool,
    pub concurrency: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            user_match_key: UserMatchKey::default(),
            match_internal_users: false,
            concurrency: crate::config::default_concurrency(),
        }
    }
}

/// One pass over the cluster's security configuration.
///
/// Listing failures abort the pass. Failures while processing a single Role
/// are recorded in the report and the remaining Roles continue.
pub struct SyncPass {
    source: Arc<dyn PermissionSource>,
    options: SyncOptions,
    context: Arc<PassContext>,
}

impl SyncPass {
    pub fn new(source: Arc<dyn PermissionSource>, options: SyncOptions) -> Self {
        Self {
            source,
            options,
            context: Arc::new(PassContext::new()),
        }
    }

    pub fn context(&self) -> &Arc<PassContext> {
        &self.context
    }

    pub async fn run(&self) -> Result<SyncReport> {
        let started = Instant::now();
        info!(concurrency = self.options.concurrency, "Starting sync pass");

        let users = UserBuilder::new(self.source.clone()).fetch().await?;

        let mut matcher = ExternalMatcher::new(self.options.user_match_key);
        if self.options.match_internal_users {
            matcher = matcher.with_internal_users(users.iter().map(|u| u.username.clone()));
        }

        let builder = RoleBuilder::new(
            self.source.clone(),
            Arc::new(matcher),
            self.context.clone(),
        );
        let roles = builder.fetch().await?;

        let outcomes: Vec<(String, Result<RoleGraph>)> = stream::iter(roles.iter())
            .map(|role| {
                let builder = builder.clone();
                async move {
                    let outcome = builder.sync_role(&role.name).await;
                    (role.name.clone(), outcome)
                }
            })
            .buffer_unordered(self.options.concurrency.max(1))
            .collect()
            .await;

        let mut results = Vec::new();
        let mut failures = Vec::new();
        for (name, outcome) in outcomes {
            match outcome {
                Ok(graph) => results.push(RoleSyncResult {
                    role: graph.resource.id,
                    entitlements: graph.entitlements,
                    grants: graph.grants,
                }),
                Err(e) => {
                    error!(role = %name, error = %e, "Role sync failed");
                    failures.push(RoleFailure::new(name, &e));
                }
            }
        }
        results.sort_by(|a, b| a.role.resource.cmp(&b.role.resource));
        failures.sort_by(|a, b| a.role.cmp(&b.role));

        let mut resources: Vec<Resource> = roles.iter().map(role_resource).collect();
        resources.extend(users.iter().map(user_resource));

        let summary = SyncSummary {
            roles: roles.len(),
            users: users.len(),
            entitlements: results.iter().map(|r| r.entitlements.len()).sum(),
            grants: results.iter().map(|r| r.grants.len()).sum(),
            failed_roles: failures.len(),
            duration_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            roles = summary.roles,
            users = summary.users,
            entitlements = summary.entitlements,
            grants = summary.grants,
            failed_roles = summary.failed_roles,
            duration_ms = summary.duration_ms,
            "Sync pass completed"
        );

        Ok(SyncReport {
            resource_types: resource_types(),
            resources,
            roles: results,
            failures,
            summary,
        })
    }
}
