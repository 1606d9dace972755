use parking_lot::RwLock;

use crate::metadata::{
    declid::DeclId,
    member::{MemberAccess, MemberFlags},
    scope::ScopeRef,
    source::DeclInfo,
};

/// The replaceable portion of a member description.
///
/// Everything here is wholesale swapped when the backing declaration is reloaded;
/// nothing in the payload participates in the member's identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberPayload {
    /// Declared type of the member, as spelled by the source.
    pub type_name: String,
    /// Byte offset within the owning aggregate, when the source knows it.
    pub offset: Option<u32>,
    /// Property bits of the declaration.
    pub flags: MemberFlags,
}

/// A reflective member descriptor with reload-stable identity.
///
/// The handle's name is fixed at construction. The declaration id and payload are
/// interior-mutable: [`Member::update`] replaces both in place, so external holders
/// of the same [`MemberRc`](crate::metadata::member::MemberRc) transparently observe
/// the refreshed data after a reload cycle.
pub struct Member {
    /// Display name, immutable once set.
    name: String,
    /// Weak back-reference to the owning scope; `None` for globals.
    owner: Option<ScopeRef>,
    /// Current declaration id; null once the handle is detached.
    decl_id: RwLock<DeclId>,
    payload: RwLock<MemberPayload>,
}

impl Member {
    /// Builds a handle from resolved declaration info.
    ///
    /// Returns `None` when the info carries no name — nameless declarations cannot be
    /// recovered by name later and are not worth describing.
    #[must_use]
    pub fn new_from_info(info: &DeclInfo, owner: Option<ScopeRef>) -> Option<Self> {
        let name = info.name()?.to_string();
        Some(Member {
            name,
            owner,
            decl_id: RwLock::new(info.id()),
            payload: RwLock::new(info.payload().clone()),
        })
    }

    /// Refreshes the handle from new declaration info, preserving identity.
    ///
    /// The name is intentionally left alone: recovery matched on it, and a handle
    /// whose name changed is a different member.
    pub fn update(&self, info: &DeclInfo) {
        *self.decl_id.write() = info.id();
        *self.payload.write() = info.payload().clone();
    }

    /// Severs the handle from its backing declaration.
    ///
    /// After this the id reads as null and lookups through any registry miss. The
    /// last known payload remains readable.
    pub fn detach(&self) {
        *self.decl_id.write() = DeclId::NULL;
    }

    /// True once [`Member::detach`] has run and no update has re-attached the handle.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.decl_id.read().is_null()
    }

    /// The member's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current declaration id.
    #[must_use]
    pub fn declaration_id(&self) -> DeclId {
        *self.decl_id.read()
    }

    /// The owning scope back-reference, when the member belongs to one.
    #[must_use]
    pub fn owner(&self) -> Option<&ScopeRef> {
        self.owner.as_ref()
    }

    /// Snapshot of the current payload.
    #[must_use]
    pub fn payload(&self) -> MemberPayload {
        self.payload.read().clone()
    }

    /// The member's declared type name.
    #[must_use]
    pub fn type_name(&self) -> String {
        self.payload.read().type_name.clone()
    }

    /// Byte offset within the owning aggregate, when known.
    #[must_use]
    pub fn offset(&self) -> Option<u32> {
        self.payload.read().offset
    }

    /// Current property bits.
    #[must_use]
    pub fn flags(&self) -> MemberFlags {
        self.payload.read().flags
    }

    /// Access level derived from the property bits.
    #[must_use]
    pub fn access(&self) -> MemberAccess {
        MemberAccess::from_flags(self.flags())
    }

    /// True for per-scope (static) members.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags().contains(MemberFlags::STATIC)
    }

    /// True for members that cannot be written after initialization.
    #[must_use]
    pub fn is_const(&self) -> bool {
        self.flags().contains(MemberFlags::CONST)
    }
}

impl std::fmt::Debug for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("decl_id", &self.declaration_id())
            .field("payload", &*self.payload.read())
            .finish_non_exhaustive()
    }
}
