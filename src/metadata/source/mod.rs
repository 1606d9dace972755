//! The backing symbol source seam.
//!
//! A [`SymbolSource`] is the external authority that knows which declarations
//! currently exist: an interpreter or compiler front end able to enumerate a scope,
//! vouch for an id, resolve a name, and resynthesize full declaration info on demand.
//! Registries consume the source exclusively through this trait; the crate ships one
//! implementation, [`TableSource`], for embedding and tests.
//!
//! All failure modes at this boundary are absences, not errors: an id the source no
//! longer recognizes, a name that resolves to nothing, a declaration that cannot be
//! materialized — each comes back as `None`/`false` and the registry reports absence
//! to its caller.

use crate::metadata::{declid::DeclId, member::MemberPayload, scope::ScopeRef};

mod table;

pub use table::TableSource;

/// Transient record describing one declaration, as handed out by a source.
///
/// Info objects are snapshots: they do not track later changes in the source. A
/// registry that wants to retain one detaches it first via
/// [`SymbolSource::copy_info`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclInfo {
    id: DeclId,
    name: Option<String>,
    payload: MemberPayload,
}

impl DeclInfo {
    /// Assembles declaration info.
    #[must_use]
    pub fn new(id: DeclId, name: Option<String>, payload: MemberPayload) -> Self {
        DeclInfo { id, name, payload }
    }

    /// The declaration's current id.
    #[must_use]
    pub fn id(&self) -> DeclId {
        self.id
    }

    /// The declaration's name, when it has a usable one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The descriptive payload.
    #[must_use]
    pub fn payload(&self) -> &MemberPayload {
        &self.payload
    }
}

/// Enumeration cursor over a scope's declarations. Exhaustion is `None`.
pub type DeclCursor<'a> = Box<dyn Iterator<Item = DeclInfo> + 'a>;

/// The external symbol authority backing one or more member registries.
///
/// `owner` is `None` for the global scope throughout. Implementations must answer
/// promptly — registry calls into the source are blocking — and must not call back
/// into a registry that is mid-operation on the same thread.
pub trait SymbolSource: Send + Sync {
    /// Opens an enumeration cursor over the declarations of `owner`.
    fn enumerate(&self, owner: Option<&ScopeRef>) -> DeclCursor<'_>;

    /// Authoritative check that `id` is still a live declaration in `owner`'s scope.
    fn contains(&self, owner: Option<&ScopeRef>, id: DeclId) -> bool;

    /// Resolves a name to a declaration id within `owner`'s scope.
    fn resolve_name(&self, owner: Option<&ScopeRef>, name: &str) -> Option<DeclId>;

    /// Produces full declaration info for a live id.
    fn materialize(&self, id: DeclId, owner: Option<&ScopeRef>) -> Option<DeclInfo>;

    /// Whether an enumerated declaration is valid enough to describe.
    fn is_valid(&self, decl: &DeclInfo) -> bool {
        !decl.id().is_null()
    }

    /// Reads the declaration's name, when it has one.
    fn name_of(&self, decl: &DeclInfo) -> Option<String> {
        decl.name().map(str::to_string)
    }

    /// Derives the declaration id from an info record.
    fn decl_id_of(&self, decl: &DeclInfo) -> DeclId {
        decl.id()
    }

    /// Detaches a transient info record for longer retention.
    fn copy_info(&self, info: &DeclInfo) -> DeclInfo {
        info.clone()
    }
}
