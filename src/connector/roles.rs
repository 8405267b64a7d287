//! Role resources, their entitlements and grants

use crate::client::{PermissionSource, Role, RoleMapping};
use crate::core::{
    Entitlement, EntitlementIndex, ExternalMatcher, Grant, PassContext, Resource, ResourceId,
    synthesize_entitlements, synthesize_grants,
};
use crate::utils::error::{ConnectorError, RecordKind, Result};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Everything a single Role contributes to the graph
#[derive(Debug, Clone)]
pub struct RoleGraph {
    pub resource: Resource,
    pub entitlements: Vec<Entitlement>,
    pub grants: Vec<Grant>,
}

/// Builds `role` resources and drives synthesis for them
///
/// The declare phase stores each Role's entitlement index in the shared
/// [`PassContext`]; the grant phase reads it back.
#[derive(Clone)]
pub struct RoleBuilder {
    source: Arc<dyn PermissionSource>,
    matcher: Arc<ExternalMatcher>,
    context: Arc<PassContext>,
}

impl RoleBuilder {
    pub fn new(
        source: Arc<dyn PermissionSource>,
        matcher: Arc<ExternalMatcher>,
        context: Arc<PassContext>,
    ) -> Self {
        Self {
            source,
            matcher,
            context,
        }
    }

    pub fn context(&self) -> &Arc<PassContext> {
        &self.context
    }

    /// Fetch every Role, sorted by name
    pub async fn fetch(&self) -> Result<Vec<Role>> {
        let roles = self.source.get_roles().await?;
        debug!(count = roles.len(), "Fetched roles");
        Ok(roles)
    }

    pub async fn list(&self) -> Result<Vec<Resource>> {
        Ok(self.fetch().await?.iter().map(role_resource).collect())
    }

    /// Declare the entitlements of one Role and record its index for the pass
    #[instrument(skip(self), fields(role = %resource))]
    pub async fn entitlements(&self, resource: &ResourceId) -> Result<Vec<Entitlement>> {
        let (role, mapping) = self.fetch_role(&resource.resource).await?;
        let (entitlements, _) = self.declare(resource, &role, mapping.as_ref())?;
        Ok(entitlements)
    }

    /// Synthesize the grants of one Role.
    ///
    /// Reuses the index stored by [`Self::entitlements`] earlier in the pass,
    /// declaring it first when absent.
    #[instrument(skip(self), fields(role = %resource))]
    pub async fn grants(&self, resource: &ResourceId) -> Result<Vec<Grant>> {
        let (role, mapping) = self.fetch_role(&resource.resource).await?;

        let index = match self.context.get(resource) {
            Some(index) => index,
            None => self.declare(resource, &role, mapping.as_ref())?.1,
        };

        Ok(synthesize_grants(
            resource,
            &role,
            mapping.as_ref(),
            &index,
            &self.matcher,
        )?)
    }

    /// Run both phases for one Role from a single fetch
    #[instrument(skip(self))]
    pub async fn sync_role(&self, name: &str) -> Result<RoleGraph> {
        let (role, mapping) = self.fetch_role(name).await?;
        let resource = role_resource(&role);

        let (entitlements, _) = self.declare(&resource.id, &role, mapping.as_ref())?;
        let index = self.context.get(&resource.id).ok_or_else(|| {
            ConnectorError::internal(format!("entitlement index missing for {}", resource.id))
        })?;
        let grants = synthesize_grants(
            &resource.id,
            &role,
            mapping.as_ref(),
            &index,
            &self.matcher,
        )?;

        debug!(
            entitlements = entitlements.len(),
            grants = grants.len(),
            "Role synthesized"
        );

        Ok(RoleGraph {
            resource,
            entitlements,
            grants,
        })
    }

    fn declare(
        &self,
        resource: &ResourceId,
        role: &Role,
        mapping: Option<&RoleMapping>,
    ) -> Result<(Vec<Entitlement>, Arc<EntitlementIndex>)> {
        let (entitlements, index) = synthesize_entitlements(resource, role, mapping)?;
        let index = self.context.insert(resource.clone(), index);
        Ok((entitlements, index))
    }

    async fn fetch_role(&self, name: &str) -> Result<(Role, Option<RoleMapping>)> {
        let role = self.source.get_role(name).await?;
        let mapping = self.fetch_mapping(name).await?;
        Ok((role, mapping))
    }

    /// A missing mapping means the Role is unassigned
    async fn fetch_mapping(&self, name: &str) -> Result<Option<RoleMapping>> {
        match self.source.get_role_mapping(name).await {
            Ok(mapping) => Ok(Some(mapping)),
            Err(e) if e.is_not_found(RecordKind::RoleMapping) => {
                debug!(role = %name, "No role mapping");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Project a Role onto a graph resource
pub fn role_resource(role: &Role) -> Resource {
    let mut profile = BTreeMap::new();
    profile.insert("description".to_string(), json!(role.description));
    profile.insert("static".to_string(), json!(role.is_static));
    profile.insert("hidden".to_string(), json!(role.hidden));
    profile.insert("reserved".to_string(), json!(role.reserved));

    Resource {
        id: ResourceId::role(&role.name),
        display_name: role.name.clone(),
        profile,
    }
}
