//! Entitlement synthesis
//!
//! Converts one Role (and its mapping, when there is one) into the flat set of
//! entitlements it implies, plus an index from entitlement kind to id that the
//! grant synthesizer resolves references against.

use super::error::SynthesisError;
use super::identifier;
use super::types::{
    Entitlement, EntitlementId, EntitlementKind, ResourceId, USER_RESOURCE_TYPE,
};
use crate::client::models::{Role, RoleMapping};
use std::collections::HashMap;
use tracing::trace;

/// Ids of the entitlements declared for one Role in one pass, in emission order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntitlementIndex {
    entries: Vec<(EntitlementKind, EntitlementId)>,
    positions: HashMap<EntitlementKind, usize>,
}

impl EntitlementIndex {
    /// Record `kind`, returning false when it was already declared
    fn insert(&mut self, kind: EntitlementKind, id: EntitlementId) -> bool {
        if self.positions.contains_key(&kind) {
            return false;
        }
        self.positions.insert(kind.clone(), self.entries.len());
        self.entries.push((kind, id));
        true
    }

    pub fn get(&self, kind: &EntitlementKind) -> Option<&EntitlementId> {
        self.positions.get(kind).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, kind: &EntitlementKind) -> bool {
        self.positions.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntitlementKind, &EntitlementId)> {
        self.entries.iter().map(|(kind, id)| (kind, id))
    }

    /// Label to id pairs, in emission order
    pub fn labels(&self) -> impl Iterator<Item = (String, &EntitlementId)> {
        self.entries.iter().map(|(kind, id)| (kind.label(), id))
    }
}

/// Permission kinds implied by a role, in input order and without repeats
pub fn permission_kinds(role: &Role) -> Vec<EntitlementKind> {
    let mut kinds: Vec<EntitlementKind> = Vec::new();
    let cluster = role.cluster_permissions.iter().map(EntitlementKind::cluster);
    let index = role.index_permissions.iter().flat_map(|block| {
        block
            .allowed_actions
            .iter()
            .map(move |action| EntitlementKind::index(&block.index_patterns, action))
    });
    for kind in cluster.chain(index) {
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    kinds
}

/// Assignment channel kinds implied by a mapping: backend roles, then users
pub fn assignment_kinds(mapping: &RoleMapping) -> Vec<EntitlementKind> {
    let mut kinds: Vec<EntitlementKind> = Vec::new();
    let groups = mapping
        .backend_roles
        .iter()
        .map(EntitlementKind::group_assignment);
    let users = mapping.users.iter().map(EntitlementKind::user_assignment);
    for kind in groups.chain(users) {
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    kinds
}

fn describe(kind: &EntitlementKind, role: &str) -> String {
    match kind {
        EntitlementKind::ClusterPermission { permission } => {
            format!("Cluster permission {} granted by role {}", permission, role)
        }
        EntitlementKind::IndexPermission {
            index_patterns,
            action,
        } => format!(
            "Index permission {} on [{}] granted by role {}",
            action,
            index_patterns.join(", "),
            role
        ),
        EntitlementKind::GroupAssignment { backend_role } => {
            format!("Members of backend role {} assigned to role {}", backend_role, role)
        }
        EntitlementKind::UserAssignment { user } => {
            format!("User {} assigned to role {}", user, role)
        }
    }
}

/// Declare every entitlement implied by `role` and its optional `mapping`.
///
/// Without a mapping only cluster and index permission entitlements are
/// produced. Identical kinds are declared once.
pub fn synthesize_entitlements(
    resource: &ResourceId,
    role: &Role,
    mapping: Option<&RoleMapping>,
) -> Result<(Vec<Entitlement>, EntitlementIndex), SynthesisError> {
    let mut kinds = permission_kinds(role);
    if let Some(mapping) = mapping {
        kinds.extend(assignment_kinds(mapping));
    }

    let mut entitlements = Vec::with_capacity(kinds.len());
    let mut index = EntitlementIndex::default();

    for kind in kinds {
        let id = identifier::entitlement_id(resource, &kind)?;
        if !index.insert(kind.clone(), id.clone()) {
            continue;
        }
        trace!(role = %resource, label = %kind.label(), %id, "declared entitlement");
        entitlements.push(Entitlement {
            id,
            resource: resource.clone(),
            display_name: kind.label(),
            description: Some(describe(&kind, &resource.resource)),
            purpose: kind.purpose(),
            grantable_to: vec![USER_RESOURCE_TYPE.to_string()],
            kind,
        });
    }

    Ok((entitlements, index))
}
