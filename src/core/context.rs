//! Pass-scoped entitlement index cache

use super::entitlements::EntitlementIndex;
use super::types::ResourceId;
use dashmap::DashMap;
use std::sync::Arc;

/// State shared by the declare and grant phases of one sync pass.
///
/// Each Role's entry is written once when its entitlements are declared and
/// read when its grants are synthesized. Roles never read each other's
/// entries, so phases may run concurrently across Roles.
#[derive(Debug, Default)]
pub struct PassContext {
    indexes: DashMap<ResourceId, Arc<EntitlementIndex>>,
}

impl PassContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the index declared for `role`, replacing any earlier one
    pub fn insert(&self, role: ResourceId, index: EntitlementIndex) -> Arc<EntitlementIndex> {
        let index = Arc::new(index);
        self.indexes.insert(role, index.clone());
        index
    }

    pub fn get(&self, role: &ResourceId) -> Option<Arc<EntitlementIndex>> {
        self.indexes.get(role).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}
