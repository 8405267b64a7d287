//! Grant synthesis
//!
//! Builds grants from a Role resource to the principals named in its mapping.
//! Every referenced entitlement id is resolved through the role's
//! [`EntitlementIndex`]; nothing is re-derived here.

use super::entitlements::{EntitlementIndex, permission_kinds};
use super::error::SynthesisError;
use super::identifier;
use super::matcher::ExternalMatcher;
use super::types::{
    EntitlementId, EntitlementKind, Grant, GrantExpandable, GrantTarget, PrincipalKind, ResourceId,
};
use crate::client::models::{Role, RoleMapping};
use std::collections::HashSet;
use tracing::trace;

fn resolve<'a>(
    index: &'a EntitlementIndex,
    resource: &ResourceId,
    kind: &EntitlementKind,
) -> Result<&'a EntitlementId, SynthesisError> {
    index
        .get(kind)
        .ok_or_else(|| SynthesisError::DanglingEntitlement {
            role: resource.resource.clone(),
            label: kind.label(),
        })
}

/// Expansion over every permission entitlement of the role, or `None` when the
/// role carries no permissions.
///
/// Expansion is shallow: only direct members of a matched group receive the
/// permissions, never members of nested groups.
fn expansion(
    resource: &ResourceId,
    role: &Role,
    index: &EntitlementIndex,
) -> Result<Option<GrantExpandable>, SynthesisError> {
    if !role.has_permissions() {
        return Ok(None);
    }

    let entitlement_ids = permission_kinds(role)
        .iter()
        .map(|kind| resolve(index, resource, kind).cloned())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(GrantExpandable {
        entitlement_ids,
        shallow: true,
        restricted_to: vec![PrincipalKind::User],
    }))
}

/// Synthesize the grants implied by `mapping`.
///
/// A role without a mapping has not been assigned to anyone yet and yields no
/// grants.
pub fn synthesize_grants(
    resource: &ResourceId,
    role: &Role,
    mapping: Option<&RoleMapping>,
    index: &EntitlementIndex,
    matcher: &ExternalMatcher,
) -> Result<Vec<Grant>, SynthesisError> {
    let Some(mapping) = mapping else {
        return Ok(Vec::new());
    };

    let expandable = expansion(resource, role, index)?;

    let groups = mapping.backend_roles.iter().map(|backend_role| {
        (
            EntitlementKind::group_assignment(backend_role),
            matcher.match_group(backend_role),
        )
    });
    let users = mapping
        .users
        .iter()
        .map(|user| (EntitlementKind::user_assignment(user), matcher.match_user(user)));

    let mut seen = HashSet::new();
    let mut grants = Vec::with_capacity(mapping.backend_roles.len() + mapping.users.len());

    for (kind, target) in groups.chain(users) {
        if !seen.insert(kind.clone()) {
            continue;
        }
        let entitlement = resolve(index, resource, &kind)?.clone();
        let id = identifier::grant_id(resource, &entitlement, &target)?;
        trace!(role = %resource, label = %kind.label(), %id, "synthesized grant");

        grants.push(Grant {
            id,
            resource: resource.clone(),
            entitlement,
            target,
            expandable: expandable.clone(),
        });
    }

    Ok(grants)
}
