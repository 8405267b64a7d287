//! Identity/permission graph types emitted by the synthesis engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Resource type id for users
pub const USER_RESOURCE_TYPE: &str = "user";
/// Resource type id for roles
pub const ROLE_RESOURCE_TYPE: &str = "role";

/// Reference to a resource in the graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId {
    pub resource_type: String,
    pub resource: String,
}

impl ResourceId {
    pub fn new(resource_type: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource: resource.into(),
        }
    }

    pub fn role(name: impl Into<String>) -> Self {
        Self::new(ROLE_RESOURCE_TYPE, name)
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self::new(USER_RESOURCE_TYPE, name)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_type, self.resource)
    }
}

/// Trait advertised by a resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceTrait {
    User,
    Group,
    Role,
}

/// Declaration of a resource type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub traits: Vec<ResourceTrait>,
    /// Downstream should not ask this type for entitlements or grants
    #[serde(default)]
    pub skip_entitlements_and_grants: bool,
}

/// A principal or permission holder in the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub display_name: String,
    #[serde(default)]
    pub profile: BTreeMap<String, serde_json::Value>,
}

/// Kind of principal a grant target or expansion applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    User,
    Group,
}

/// Entitlement shape. Identifiers are synthesized over this structure, so
/// two kinds never collide even when their labels would.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntitlementKind {
    ClusterPermission {
        permission: String,
    },
    IndexPermission {
        /// Sorted, de-duplicated patterns of the owning block
        index_patterns: Vec<String>,
        action: String,
    },
    GroupAssignment {
        backend_role: String,
    },
    UserAssignment {
        user: String,
    },
}

impl EntitlementKind {
    pub fn cluster(permission: impl Into<String>) -> Self {
        Self::ClusterPermission {
            permission: permission.into(),
        }
    }

    /// Index permission scoped to `patterns`; pattern order is not significant
    pub fn index<I, S>(patterns: I, action: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index_patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        index_patterns.sort();
        index_patterns.dedup();
        Self::IndexPermission {
            index_patterns,
            action: action.into(),
        }
    }

    pub fn group_assignment(backend_role: impl Into<String>) -> Self {
        Self::GroupAssignment {
            backend_role: backend_role.into(),
        }
    }

    pub fn user_assignment(user: impl Into<String>) -> Self {
        Self::UserAssignment { user: user.into() }
    }

    /// Human-readable label, e.g. `cluster_permission:cluster:monitor/health`
    pub fn label(&self) -> String {
        match self {
            Self::ClusterPermission { permission } => format!("cluster_permission:{}", permission),
            Self::IndexPermission { action, .. } => format!("index_permission:{}", action),
            Self::GroupAssignment { backend_role } => format!("group_assignment:{}", backend_role),
            Self::UserAssignment { user } => format!("user_assignment:{}", user),
        }
    }

    pub fn purpose(&self) -> EntitlementPurpose {
        match self {
            Self::ClusterPermission { .. } | Self::IndexPermission { .. } => {
                EntitlementPurpose::Permission
            }
            Self::GroupAssignment { .. } | Self::UserAssignment { .. } => {
                EntitlementPurpose::Assignment
            }
        }
    }

    pub fn is_permission(&self) -> bool {
        self.purpose() == EntitlementPurpose::Permission
    }
}

/// Whether an entitlement represents a capability or a membership channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementPurpose {
    Permission,
    Assignment,
}

/// Content-addressed entitlement identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntitlementId(pub(crate) String);

impl EntitlementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntitlementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content-addressed grant identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantId(pub(crate) String);

impl GrantId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GrantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An addressable entitlement owned by one Role resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
    pub id: EntitlementId,
    pub resource: ResourceId,
    pub kind: EntitlementKind,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub purpose: EntitlementPurpose,
    pub grantable_to: Vec<String>,
}

/// Attribute a downstream identity system matches a principal on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKey {
    Name,
    Email,
    Username,
    Id,
}

impl MatchKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKey::Name => "name",
            MatchKey::Email => "email",
            MatchKey::Username => "username",
            MatchKey::Id => "id",
        }
    }
}

/// Principal a grant points at
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GrantTarget {
    /// Principal owned by this connector, referenced by literal id
    Internal { principal: ResourceId },
    /// Principal resolved downstream by key/value
    ExternalMatch {
        principal_kind: PrincipalKind,
        key: MatchKey,
        value: String,
    },
    /// Every externally known principal of the kind
    ExternalMatchAll { principal_kind: PrincipalKind },
}

impl GrantTarget {
    pub fn principal_kind(&self) -> PrincipalKind {
        match self {
            GrantTarget::Internal { .. } => PrincipalKind::User,
            GrantTarget::ExternalMatch { principal_kind, .. }
            | GrantTarget::ExternalMatchAll { principal_kind } => *principal_kind,
        }
    }
}

/// Instructs downstream to grant further entitlements to matched principals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantExpandable {
    pub entitlement_ids: Vec<EntitlementId>,
    /// Expand onto direct members only
    pub shallow: bool,
    pub restricted_to: Vec<PrincipalKind>,
}

/// Directed edge from a Role resource to a principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    pub id: GrantId,
    pub resource: ResourceId,
    /// Assignment entitlement of the channel this grant came from
    pub entitlement: EntitlementId,
    pub target: GrantTarget,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expandable: Option<GrantExpandable>,
}
