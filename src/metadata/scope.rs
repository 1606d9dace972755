//! Owner scopes for member registries.
//!
//! A [`Scope`] stands for the containing context of a set of members: a concrete
//! aggregate type (struct, class, union) or an open namespace. Registries and member
//! handles never own their scope — they hold a [`ScopeRef`], a weak back-reference
//! used purely for scoping decisions, so that a scope owning a registry does not form
//! a reference cycle with it.

use std::sync::{Arc, Weak};

use crate::metadata::declid::DeclId;

/// Reference-counted handle to a [`Scope`].
pub type ScopeRc = Arc<Scope>;

/// Whether a scope's member set is closed after a full load.
///
/// Aggregates (struct/class/union) cannot grow new members once their definition has
/// been seen, so a registry over one loads at most once. Namespaces (and the global
/// scope, which has no [`Scope`] at all) can gain declarations at any time and must
/// re-enumerate on every load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ScopeShape {
    /// Fixed-shape owner: the member set is complete after one full enumeration.
    Aggregate,
    /// Open owner: new declarations can appear without invalidating prior ones.
    Namespace,
}

impl ScopeShape {
    /// Returns true for scopes whose member set cannot grow after a full load.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, ScopeShape::Aggregate)
    }
}

/// A containing scope known to the backing symbol source.
///
/// The scope's own [`DeclId`] is how the source keys its per-scope declaration
/// tables; the registry never interprets it.
#[derive(Debug)]
pub struct Scope {
    id: DeclId,
    name: String,
    shape: ScopeShape,
}

impl Scope {
    /// Creates a scope record.
    #[must_use]
    pub fn new(id: DeclId, name: impl Into<String>, shape: ScopeShape) -> Self {
        Scope {
            id,
            name: name.into(),
            shape,
        }
    }

    /// The scope's identity inside the backing source.
    #[must_use]
    pub fn id(&self) -> DeclId {
        self.id
    }

    /// The scope's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the scope is fixed-shape or open.
    #[must_use]
    pub fn shape(&self) -> ScopeShape {
        self.shape
    }
}

/// A non-owning reference to a [`Scope`] that survives the scope being dropped.
///
/// Mirrors the usual weak-wrapper pattern: `upgrade` yields a strong handle while the
/// scope is alive, accessors return `None` afterwards. Held by registries and member
/// handles as the owner back-reference.
#[derive(Clone, Debug)]
pub struct ScopeRef {
    weak_ref: Weak<Scope>,
}

impl ScopeRef {
    /// Creates a weak reference from a strong scope handle.
    #[must_use]
    pub fn new(strong_ref: &ScopeRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Gets a strong handle to the scope, or `None` if it has been dropped.
    #[must_use]
    pub fn upgrade(&self) -> Option<ScopeRc> {
        self.weak_ref.upgrade()
    }

    /// Checks whether the referenced scope is still alive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weak_ref.strong_count() > 0
    }

    /// The scope's id, if it is still alive.
    #[must_use]
    pub fn id(&self) -> Option<DeclId> {
        self.upgrade().map(|s| s.id())
    }

    /// The scope's shape, if it is still alive.
    #[must_use]
    pub fn shape(&self) -> Option<ScopeShape> {
        self.upgrade().map(|s| s.shape())
    }

    /// The scope's name, if it is still alive.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.upgrade().map(|s| s.name().to_string())
    }
}

impl From<ScopeRc> for ScopeRef {
    fn from(strong_ref: ScopeRc) -> Self {
        Self::new(&strong_ref)
    }
}
