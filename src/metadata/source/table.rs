//! In-memory reference implementation of [`SymbolSource`].

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;

use crate::{
    metadata::{
        declid::DeclId,
        member::MemberPayload,
        scope::{Scope, ScopeRc, ScopeRef, ScopeShape},
        source::{DeclCursor, DeclInfo, SymbolSource},
    },
    Error::UnknownScope,
    Result,
};

/// One declaration row. The global scope is keyed by the null id.
#[derive(Debug, Clone)]
struct DeclRecord {
    scope: DeclId,
    name: String,
    payload: MemberPayload,
}

/// An embeddable, thread-safe symbol table.
///
/// `TableSource` plays the part of the interpreter front end for hosts that do not
/// have one: declarations are added and retired through `&self` methods, ids are
/// minted monotonically, and the [`SymbolSource`] view reflects the table's current
/// state. Because ids grow monotonically, iterating the primary map doubles as
/// enumeration in declaration order.
///
/// Retiring a declaration makes its id stale immediately; re-adding a declaration
/// with the same name mints a fresh id, which is exactly the disappear/reappear
/// behavior member registries are built to absorb.
///
/// # Examples
///
/// ```rust
/// use declscope::prelude::*;
///
/// let source = TableSource::new();
/// let id = source.add_global("g_counter", MemberPayload {
///     type_name: "u64".to_string(),
///     offset: None,
///     flags: MemberFlags::STATIC,
/// });
///
/// assert!(source.contains(None, id));
/// assert_eq!(source.resolve_name(None, "g_counter"), Some(id));
///
/// source.retire(id);
/// assert!(!source.contains(None, id));
/// ```
pub struct TableSource {
    /// Primary storage, ordered by id (== declaration order).
    decls: SkipMap<DeclId, DeclRecord>,
    /// (scope id, name) -> declaration id. Last declaration wins resolution.
    names: DashMap<(DeclId, String), DeclId>,
    /// Registered scopes, so member insertion can reject unknown owners.
    scopes: DashMap<DeclId, String>,
    next_id: AtomicU64,
}

impl TableSource {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        TableSource {
            decls: SkipMap::new(),
            names: DashMap::new(),
            scopes: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    fn mint(&self) -> DeclId {
        DeclId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers a scope and returns its strong handle.
    ///
    /// The caller keeps the `ScopeRc` alive for as long as the scope exists;
    /// registries and members only ever hold weak references to it.
    #[must_use]
    pub fn add_scope(&self, name: &str, shape: ScopeShape) -> ScopeRc {
        let id = self.mint();
        self.scopes.insert(id, name.to_string());
        Arc::new(Scope::new(id, name, shape))
    }

    /// Declares a global variable and returns its id.
    pub fn add_global(&self, name: &str, payload: MemberPayload) -> DeclId {
        self.insert_decl(DeclId::NULL, name, payload)
    }

    /// Declares a member of `scope` and returns its id.
    ///
    /// # Errors
    /// [`UnknownScope`] when `scope` was not created by [`TableSource::add_scope`]
    /// on this table.
    pub fn add_member(
        &self,
        scope: &ScopeRc,
        name: &str,
        payload: MemberPayload,
    ) -> Result<DeclId> {
        if !self.scopes.contains_key(&scope.id()) {
            return Err(UnknownScope(scope.id()));
        }
        Ok(self.insert_decl(scope.id(), name, payload))
    }

    fn insert_decl(&self, scope: DeclId, name: &str, payload: MemberPayload) -> DeclId {
        let id = self.mint();
        self.decls.insert(
            id,
            DeclRecord {
                scope,
                name: name.to_string(),
                payload,
            },
        );
        self.names.insert((scope, name.to_string()), id);
        id
    }

    /// Retires a declaration, making its id stale.
    ///
    /// Returns false when the id was not live. The name mapping is dropped only if
    /// it still points at this id — a later same-name declaration keeps its own entry.
    pub fn retire(&self, id: DeclId) -> bool {
        let Some(entry) = self.decls.remove(&id) else {
            return false;
        };
        let record = entry.value();
        self.names
            .remove_if(&(record.scope, record.name.clone()), |_, mapped| *mapped == id);
        true
    }

    /// Number of live declarations across all scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// True when no declarations are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Maps an owner reference to the id the table keys that scope's rows by.
    ///
    /// `None` for a dropped scope: a dead owner has no declarations.
    fn scope_key(owner: Option<&ScopeRef>) -> Option<DeclId> {
        match owner {
            None => Some(DeclId::NULL),
            Some(scope) => scope.id(),
        }
    }

    fn info_for(id: DeclId, record: &DeclRecord) -> DeclInfo {
        DeclInfo::new(id, Some(record.name.clone()), record.payload.clone())
    }
}

impl Default for TableSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolSource for TableSource {
    fn enumerate(&self, owner: Option<&ScopeRef>) -> DeclCursor<'_> {
        let Some(key) = Self::scope_key(owner) else {
            return Box::new(std::iter::empty());
        };
        Box::new(self.decls.iter().filter_map(move |entry| {
            let record = entry.value();
            if record.scope == key {
                Some(Self::info_for(*entry.key(), record))
            } else {
                None
            }
        }))
    }

    fn contains(&self, owner: Option<&ScopeRef>, id: DeclId) -> bool {
        let Some(key) = Self::scope_key(owner) else {
            return false;
        };
        self.decls
            .get(&id)
            .is_some_and(|entry| entry.value().scope == key)
    }

    fn resolve_name(&self, owner: Option<&ScopeRef>, name: &str) -> Option<DeclId> {
        let key = Self::scope_key(owner)?;
        self.names.get(&(key, name.to_string())).map(|entry| *entry)
    }

    fn materialize(&self, id: DeclId, owner: Option<&ScopeRef>) -> Option<DeclInfo> {
        let key = Self::scope_key(owner)?;
        let entry = self.decls.get(&id)?;
        let record = entry.value();
        if record.scope != key {
            return None;
        }
        Some(Self::info_for(id, record))
    }
}
