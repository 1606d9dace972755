//! The member registry orchestrator.
//!
//! [`MemberRegistry`] mediates between consumers that want cheap, stable handles and
//! a backing [`SymbolSource`] whose declarations come and go. It owns three internal
//! structures — the insertion-ordered active collection, the declaration-id index,
//! and the unloaded pool — and keeps them consistent across every operation:
//!
//! - every handle in the active collection has exactly one id-index entry keyed by
//!   its current declaration id, and vice versa;
//! - a handle is never simultaneously active and parked in the unloaded pool;
//! - the id index never disagrees with a handle's own stored id.
//!
//! Population is lazy. `load` enumerates the owner's scope; `get` and
//! `find_by_name` materialize individual members on demand, recycling parked
//! handles by name so that identity survives unload/reload cycles.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::metadata::{
    declid::DeclId,
    member::{Member, MemberRc},
    members::{ActiveCollection, IdentityIndex, UnloadedPool},
    scope::{ScopeRc, ScopeRef},
    source::{DeclInfo, SymbolSource},
};

/// A lazy, identity-indexed registry of the members of one scope.
///
/// Parameterized at construction by an optional owner context: with an aggregate
/// owner the registry describes that type's data fields and loads at most once;
/// with no owner it describes global variables and re-enumerates on every `load`,
/// because new globals can appear at any time.
///
/// All methods are synchronous and complete atomically from the caller's point of
/// view. The registry itself is single-owner (`&mut self`); see
/// [`SharedMemberRegistry`](crate::metadata::members::SharedMemberRegistry) for the
/// serialized multi-thread surface.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use declscope::prelude::*;
///
/// let source = Arc::new(TableSource::new());
/// source.add_global("g_counter", MemberPayload {
///     type_name: "u64".to_string(),
///     offset: None,
///     flags: MemberFlags::STATIC,
/// });
///
/// let mut registry = MemberRegistry::new(source, None);
/// registry.load();
///
/// let counter = registry.find_by_name("g_counter").unwrap();
/// assert_eq!(counter.type_name(), "u64");
/// ```
pub struct MemberRegistry {
    source: Arc<dyn SymbolSource>,
    owner: Option<ScopeRef>,
    active: ActiveCollection,
    ids: IdentityIndex,
    unloaded: UnloadedPool,
    loaded: bool,
}

impl MemberRegistry {
    /// Creates a registry over `owner`'s members, or over globals when `owner` is
    /// `None`. Only a weak reference to the owner is retained.
    #[must_use]
    pub fn new(source: Arc<dyn SymbolSource>, owner: Option<&ScopeRc>) -> Self {
        MemberRegistry {
            source,
            owner: owner.map(ScopeRef::new),
            active: ActiveCollection::new(),
            ids: IdentityIndex::new(),
            unloaded: UnloadedPool::new(),
            loaded: false,
        }
    }

    /// The owner back-reference, when the registry has one.
    #[must_use]
    pub fn owner(&self) -> Option<&ScopeRef> {
        self.owner.as_ref()
    }

    /// Whether a `load` has run (and, for fixed-shape owners, completed the set).
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Populates the registry from the backing source.
    ///
    /// For a fixed-shape owner that has already loaded this is a no-op; open scopes
    /// re-enumerate every time so later declarations are picked up. Enumeration
    /// folds each valid, named declaration through [`MemberRegistry::get_with_info`],
    /// which makes repeated enumeration idempotent and recycles parked handles.
    pub fn load(&mut self) {
        let owner_scope = match &self.owner {
            Some(scope) => match scope.upgrade() {
                Some(strong) => Some(strong),
                // the owner is gone; there is nothing to enumerate against
                None => return,
            },
            None => None,
        };
        if self.loaded && owner_scope.as_ref().is_some_and(|s| s.shape().is_fixed()) {
            return;
        }

        // Mark loaded before enumerating. Materializing one member may require
        // looking up a sibling of this same registry (an array member sized by
        // another member, say), and that nested lookup must not restart enumeration.
        self.loaded = true;

        debug!(
            owner = owner_scope.as_ref().map_or("<global>", |s| s.name()),
            "loading member registry"
        );

        let source = Arc::clone(&self.source);
        for decl in source.enumerate(self.owner.as_ref()) {
            // a declaration the source cannot even name is not worth listing
            if source.is_valid(&decl) && source.name_of(&decl).is_some() {
                self.get_with_info(&decl);
            }
        }
    }

    /// Returns the handle for the declaration `id`, materializing it on a miss.
    ///
    /// `None` for the null id, for an id the source disavows (stale or foreign —
    /// nothing is fabricated), and for declarations the source cannot name.
    pub fn get(&mut self, id: DeclId) -> Option<MemberRc> {
        if id.is_null() {
            return None;
        }
        if let Some(member) = self.ids.get(id) {
            return Some(member);
        }
        if !self.source.contains(self.owner.as_ref(), id) {
            return None;
        }
        let source = Arc::clone(&self.source);
        let info = source.materialize(id, self.owner.as_ref())?;
        self.adopt(id, &info)
    }

    /// Like [`MemberRegistry::get`], for callers already holding declaration info.
    ///
    /// Skips the materialize round trip; the transient info is detached via the
    /// source before retention.
    pub fn get_with_info(&mut self, info: &DeclInfo) -> Option<MemberRc> {
        let id = self.source.decl_id_of(info);
        if id.is_null() {
            return None;
        }
        if let Some(member) = self.ids.get(id) {
            return Some(member);
        }
        if !self.source.contains(self.owner.as_ref(), id) {
            return None;
        }
        let detached = self.source.copy_info(info);
        self.adopt(id, &detached)
    }

    /// Folds a validated declaration into the registry, recycling a parked
    /// same-named handle when one exists.
    fn adopt(&mut self, id: DeclId, info: &DeclInfo) -> Option<MemberRc> {
        let name = self.source.name_of(info)?;
        let member = match self.unloaded.take_by_name(&name) {
            Some(recovered) => {
                trace!(name = %name, id = %id, "recovered parked member handle");
                recovered.update(info);
                recovered
            }
            None => Arc::new(Member::new_from_info(info, self.owner.clone())?),
        };
        self.active.push_back(member.clone());
        self.ids.put(id, member.clone());
        Some(member)
    }

    /// Finds a member by name, materializing it lazily when necessary.
    ///
    /// Checks the active collection first; on a miss, asks the source to resolve
    /// the name in the owner's scope and delegates to [`MemberRegistry::get`] —
    /// so a member the caller names gets a handle even if it was never enumerated.
    pub fn find_by_name(&mut self, name: &str) -> Option<MemberRc> {
        if let Some(member) = self.active.find_by_name(name) {
            return Some(member);
        }
        let id = self.source.resolve_name(self.owner.as_ref(), name)?;
        self.get(id)
    }

    /// Active handle currently cached for `id`, without touching the source.
    #[must_use]
    pub fn cached(&self, id: DeclId) -> Option<MemberRc> {
        self.ids.get(id)
    }

    /// Parks every active handle in the unloaded pool.
    ///
    /// Handles are not destroyed; a later reload that produces a same-named
    /// declaration recovers them with identity intact.
    pub fn unload(&mut self) {
        let drained = self.active.drain();
        debug!(count = drained.len(), "unloading member registry");
        for member in drained {
            self.ids.remove_if(member.declaration_id(), &member);
            self.unloaded.put(member);
        }
        self.loaded = false;
    }

    /// Parks a single active handle. No-op when the handle is not active.
    pub fn unload_member(&mut self, member: &MemberRc) {
        if self.active.remove(member) {
            self.ids.remove_if(member.declaration_id(), member);
            self.unloaded.put(member.clone());
        }
    }

    /// Destructively empties every internal structure.
    ///
    /// Parked handles are dropped too — this is full teardown of the cached view,
    /// not part of an ordinary unload/reload cycle.
    pub fn clear(&mut self) {
        self.unloaded.clear();
        self.ids.clear();
        self.active.clear();
        self.loaded = false;
    }

    /// Clears the registry and detaches every handle it still holds.
    ///
    /// External holders of a detached handle see its id read as null from then on.
    /// Used when the registry itself is being torn down, not just its cached view.
    pub fn delete(&mut self) {
        for member in self.active.iter() {
            member.detach();
        }
        for member in self.unloaded.iter() {
            member.detach();
        }
        self.clear();
    }

    /// Removes a handle from every internal structure by pointer identity alone.
    ///
    /// This is the destruction-notification path: the handle may already be partly
    /// torn down, so neither its name hash nor its stored id is trusted — every
    /// structure is scanned with pointer comparison only.
    pub fn purge(&mut self, member: &MemberRc) {
        trace!(name = member.name(), "purging member handle");
        self.active.remove_by_ptr(member);
        self.unloaded.remove_by_ptr(member);
        self.ids.remove_value(member);
    }

    /// Ordinary removal: active collection first, then the unloaded pool.
    ///
    /// Returns the removed handle, or `None` when the registry does not hold it.
    /// The id-index entry goes away only if it points at this very handle.
    pub fn remove(&mut self, member: &MemberRc) -> Option<MemberRc> {
        let found = self.active.remove(member) || self.unloaded.remove(member);
        self.ids.remove_if(member.declaration_id(), member);
        found.then(|| member.clone())
    }

    /// Removes the active handle at `index` in iteration order.
    pub fn remove_at(&mut self, index: usize) -> Option<MemberRc> {
        let member = self.active.remove_at(index)?;
        self.ids.remove_if(member.declaration_id(), &member);
        Some(member)
    }

    fn index_identity(&mut self, member: &MemberRc) {
        let id = member.declaration_id();
        if !id.is_null() {
            self.ids.put(id, member.clone());
        }
    }

    /// Inserts a handle at the front, keeping the id index in sync.
    pub fn push_front(&mut self, member: MemberRc) {
        self.index_identity(&member);
        self.active.push_front(member);
    }

    /// Inserts a handle at the back, keeping the id index in sync.
    pub fn push_back(&mut self, member: MemberRc) {
        self.index_identity(&member);
        self.active.push_back(member);
    }

    /// Inserts a handle at `index` (clamped), keeping the id index in sync.
    pub fn insert_at(&mut self, index: usize, member: MemberRc) {
        self.index_identity(&member);
        self.active.insert_at(index, member);
    }

    /// Inserts before `anchor`. False (and no index change) when the anchor is not
    /// active.
    pub fn insert_before(&mut self, anchor: &MemberRc, member: MemberRc) -> bool {
        if self.active.insert_before(anchor, member.clone()) {
            self.index_identity(&member);
            true
        } else {
            false
        }
    }

    /// Inserts after `anchor`. False (and no index change) when the anchor is not
    /// active.
    pub fn insert_after(&mut self, anchor: &MemberRc, member: MemberRc) -> bool {
        if self.active.insert_after(anchor, member.clone()) {
            self.index_identity(&member);
            true
        } else {
            false
        }
    }

    /// Active handle at `index` in iteration order.
    #[must_use]
    pub fn member_at(&self, index: usize) -> Option<MemberRc> {
        self.active.get(index)
    }

    /// Iterates active handles in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, MemberRc> {
        self.active.iter()
    }

    /// Number of active handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// True when no handle is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Number of handles parked in the unloaded pool.
    #[must_use]
    pub fn unloaded_count(&self) -> usize {
        self.unloaded.len()
    }

    /// Number of id-index entries. Equals [`MemberRegistry::len`] whenever every
    /// active handle carries a distinct non-null id.
    #[must_use]
    pub fn identity_count(&self) -> usize {
        self.ids.len()
    }

    /// First parked handle with this name, left parked.
    #[must_use]
    pub fn unloaded_by_name(&self, name: &str) -> Option<MemberRc> {
        self.unloaded.find_by_name(name)
    }
}

impl<'a> IntoIterator for &'a MemberRegistry {
    type Item = &'a MemberRc;
    type IntoIter = std::slice::Iter<'a, MemberRc>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
