//! Reflective member metadata: identifiers, scopes, handles, sources, registries.
//!
//! This module contains everything the registry core is built from. The split
//! mirrors the problem: [`declid`] and [`scope`] name things, [`member`] describes
//! them, [`source`] is the seam to the authority that knows what currently exists,
//! and [`members`] caches that knowledge behind stable handles.
//!
//! # Key Components
//!
//! - [`declid::DeclId`] - opaque, source-scoped declaration identifier
//! - [`scope::Scope`] - owner context (aggregate type or namespace)
//! - [`member::Member`] - mutable member handle with reload-stable identity
//! - [`source::SymbolSource`] - the backing-source trait, plus the in-memory
//!   [`source::TableSource`]
//! - [`members::MemberRegistry`] - the lazy, identity-indexed registry itself
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use declscope::prelude::*;
//!
//! let source = Arc::new(TableSource::new());
//! let event = source.add_scope("Event", ScopeShape::Aggregate);
//! source.add_member(&event, "timestamp", MemberPayload {
//!     type_name: "u64".to_string(),
//!     offset: Some(0),
//!     flags: MemberFlags::PUBLIC,
//! })?;
//!
//! let mut members = MemberRegistry::new(source, Some(&event));
//! members.load();
//! assert_eq!(members.len(), 1);
//! # Ok::<(), declscope::Error>(())
//! ```

/// Opaque declaration identifiers issued by a backing source
pub mod declid;
/// Member handles and their descriptive payload
pub mod member;
/// Member registries and their internal collections
pub mod members;
/// Owner scopes and the weak scope back-reference
pub mod scope;
/// The backing symbol source seam and the in-memory reference source
pub mod source;
