//! Resource type declarations

use crate::core::{ROLE_RESOURCE_TYPE, ResourceTrait, ResourceType, USER_RESOURCE_TYPE};

/// Internal users. They hold no entitlements of their own.
pub fn user_resource_type() -> ResourceType {
    ResourceType {
        id: USER_RESOURCE_TYPE.to_string(),
        display_name: "User".to_string(),
        description: Some("OpenSearch internal user".to_string()),
        traits: vec![ResourceTrait::User],
        skip_entitlements_and_grants: true,
    }
}

/// Security roles, the owners of every entitlement and grant
pub fn role_resource_type() -> ResourceType {
    ResourceType {
        id: ROLE_RESOURCE_TYPE.to_string(),
        display_name: "Role".to_string(),
        description: Some("OpenSearch security role".to_string()),
        traits: vec![ResourceTrait::Role],
        skip_entitlements_and_grants: false,
    }
}

/// All resource types, in declaration order
pub fn resource_types() -> Vec<ResourceType> {
    vec![user_resource_type(), role_resource_type()]
}
