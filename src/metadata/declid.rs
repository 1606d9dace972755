use std::fmt;

/// An opaque identifier naming one declaration inside a backing symbol source.
///
/// A `DeclId` is only meaningful to the source that issued it. Outside the source it
/// must never be dereferenced or interpreted — only compared, hashed, and stored. The
/// id stays unique while the declaration is live; once the source retires the
/// declaration (unload, reparse) the id becomes stale, and a logically identical
/// declaration may later come back under a fresh id.
///
/// The value `0` is reserved as the null id and never names a declaration.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclId(pub u64);

impl DeclId {
    /// The null id. Lookups with it always miss.
    pub const NULL: DeclId = DeclId(0);

    /// Creates an id from a raw 64-bit value.
    #[must_use]
    pub fn new(value: u64) -> Self {
        DeclId(value)
    }

    /// Returns the raw id value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns true if this is the null id (value 0).
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for DeclId {
    fn from(value: u64) -> Self {
        DeclId(value)
    }
}

impl From<DeclId> for u64 {
    fn from(id: DeclId) -> Self {
        id.0
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId(0x{:x})", self.0)
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}
