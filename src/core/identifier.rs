//! Content-addressed identifier synthesis
//!
//! An identifier is the SHA-256 digest of the canonical JSON encoding of
//! `(domain, owner, value)`. Every input is a struct, enum or sequence, so the
//! encoding never depends on map iteration order and the same content always
//! yields the same identifier on any machine.

use super::error::SynthesisError;
use super::types::{EntitlementId, EntitlementKind, GrantId, GrantTarget, ResourceId};
use serde::Serialize;
use sha2::{Digest, Sha256};

const ENTITLEMENT_DOMAIN: &str = "entitlement";
const GRANT_DOMAIN: &str = "grant";

#[derive(Serialize)]
struct IdentifierInput<'a, T: Serialize> {
    domain: &'a str,
    owner: &'a ResourceId,
    value: &'a T,
}

/// Derive a stable identifier for `value` owned by `owner`.
///
/// Fails only when `value` has no JSON representation, which is a logic bug in
/// the caller.
pub fn synthesize<T: Serialize>(
    domain: &str,
    owner: &ResourceId,
    value: &T,
) -> Result<String, SynthesisError> {
    let input = IdentifierInput {
        domain,
        owner,
        value,
    };
    let encoded =
        serde_json::to_vec(&input).map_err(|e| SynthesisError::Identifier(e.to_string()))?;
    let digest = Sha256::digest(&encoded);
    Ok(format!("{}:{}", domain, hex::encode(digest)))
}

pub fn entitlement_id(
    owner: &ResourceId,
    kind: &EntitlementKind,
) -> Result<EntitlementId, SynthesisError> {
    synthesize(ENTITLEMENT_DOMAIN, owner, kind).map(EntitlementId)
}

pub fn grant_id(
    owner: &ResourceId,
    entitlement: &EntitlementId,
    target: &GrantTarget,
) -> Result<GrantId, SynthesisError> {
    synthesize(GRANT_DOMAIN, owner, &(entitlement, target)).map(GrantId)
}
