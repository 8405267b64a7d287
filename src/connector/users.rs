//! Internal user resources

use crate::client::{PermissionSource, User};
use crate::core::{Resource, ResourceId};
use crate::utils::error::Result;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Lists internal users as `user` resources
#[derive(Clone)]
pub struct UserBuilder {
    source: Arc<dyn PermissionSource>,
}

impl UserBuilder {
    pub fn new(source: Arc<dyn PermissionSource>) -> Self {
        Self { source }
    }

    /// Fetch internal users, sorted by username
    pub async fn fetch(&self) -> Result<Vec<User>> {
        let users = self.source.get_users().await?;
        debug!(count = users.len(), "Fetched internal users");
        Ok(users)
    }

    pub async fn list(&self) -> Result<Vec<Resource>> {
        Ok(self.fetch().await?.iter().map(user_resource).collect())
    }
}

/// Project an internal user onto a graph resource
pub fn user_resource(user: &User) -> Resource {
    let mut profile: BTreeMap<String, Value> = BTreeMap::new();
    profile.insert("display_name".to_string(), json!(user.username));
    profile.insert("login".to_string(), json!(user.username));
    profile.insert("description".to_string(), json!(user.description));
    profile.insert("reserved".to_string(), json!(user.reserved));
    profile.insert("hidden".to_string(), json!(user.hidden));
    profile.insert("static".to_string(), json!(user.is_static));
    profile.insert("backend_roles".to_string(), json!(user.backend_roles));
    profile.insert(
        "opendistro_security_roles".to_string(),
        json!(user.opendistro_security_roles),
    );
    profile.insert("attributes".to_string(), json!(user.attributes));

    Resource {
        id: ResourceId::user(&user.username),
        display_name: user.username.clone(),
        profile,
    }
}
