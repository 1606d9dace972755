use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::metadata::{declid::DeclId, member::MemberRc};

/// Declaration-id index over the handles a registry currently considers active.
///
/// Plain overwrite-on-insert map semantics; no ordering. The registry keeps this in
/// lockstep with its active collection — the index is never mutated from outside it.
#[derive(Default)]
pub struct IdentityIndex {
    map: FxHashMap<DeclId, MemberRc>,
}

impl IdentityIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `id` to `member`, overwriting any prior mapping for `id`.
    pub fn put(&mut self, id: DeclId, member: MemberRc) {
        self.map.insert(id, member);
    }

    /// Looks up the handle currently mapped to `id`.
    #[must_use]
    pub fn get(&self, id: DeclId) -> Option<MemberRc> {
        self.map.get(&id).cloned()
    }

    /// Drops the mapping for `id`, whatever it points at.
    pub fn remove(&mut self, id: DeclId) {
        self.map.remove(&id);
    }

    /// Drops the mapping for `id` only when it points at exactly `member`.
    ///
    /// Removal paths that receive a handle from the caller use this instead of
    /// [`IdentityIndex::remove`], so a foreign handle whose stored id collides with a
    /// live entry cannot evict that entry.
    pub fn remove_if(&mut self, id: DeclId, member: &MemberRc) {
        if self.map.get(&id).is_some_and(|m| Arc::ptr_eq(m, member)) {
            self.map.remove(&id);
        }
    }

    /// Drops every mapping that points at `member`, located by pointer identity.
    ///
    /// The handle's stored id is deliberately not consulted: this is the path taken
    /// while the handle may already be half torn down.
    pub fn remove_value(&mut self, member: &MemberRc) {
        self.map.retain(|_, m| !Arc::ptr_eq(m, member));
    }

    /// Drops every mapping.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Number of mapped ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True when nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
