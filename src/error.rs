use thiserror::Error;

use crate::metadata::declid::DeclId;

/// The generic Error type, which provides coverage for all errors this library can
/// potentially return.
///
/// The registry core deliberately keeps this small: absence is not an error here.
/// An id the source disavows, a name that resolves to nothing, a declaration that
/// vanished between enumeration and materialization — all of those surface as empty
/// `Option` results, because a reflective symbol table may legitimately shrink and
/// the caller decides whether absence is actionable. What remains are conditions
/// that indicate the caller misused the crate.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use declscope::{Error, prelude::*};
///
/// let source = TableSource::new();
/// let foreign = Arc::new(Scope::new(DeclId::new(999), "Foreign", ScopeShape::Aggregate));
///
/// match source.add_member(&foreign, "x", MemberPayload::default()) {
///     Err(Error::UnknownScope(id)) => println!("scope {} was never registered", id),
///     other => panic!("expected UnknownScope, got {:?}", other.is_ok()),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to take exclusive access to a shared registry.
    ///
    /// Raised when a `with` closure on a
    /// [`SharedMemberRegistry`](crate::metadata::members::SharedMemberRegistry)
    /// re-enters the same registry for mutation on the same thread. The reentrant
    /// lock itself never deadlocks; the overlapping mutable borrow is the problem,
    /// and it is reported instead of panicking.
    #[error("Failed to take exclusive access to the registry")]
    Lock,

    /// A scope handle was passed to a table that never registered it.
    ///
    /// The associated [`DeclId`] is the id the unknown scope carries.
    #[error("Scope {0} is not registered with this symbol table")]
    UnknownScope(DeclId),
}
