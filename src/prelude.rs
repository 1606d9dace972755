//! # declscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and
//! traits from the declscope library. Import it to get quick access to the
//! essential registry, handle, and source types.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all declscope operations
pub use crate::Error;

/// The result type used throughout declscope
pub use crate::Result;

// ================================================================================================
// Identifiers and Scopes
// ================================================================================================

/// Opaque declaration identifier issued by a backing source
pub use crate::metadata::declid::DeclId;

/// Owner contexts and the weak scope back-reference
pub use crate::metadata::scope::{Scope, ScopeRc, ScopeRef, ScopeShape};

// ================================================================================================
// Member Handles
// ================================================================================================

/// The member handle and its descriptive payload
pub use crate::metadata::member::{
    Member, MemberAccess, MemberFlags, MemberList, MemberPayload, MemberRc,
};

// ================================================================================================
// Symbol Sources
// ================================================================================================

/// The backing-source seam and the bundled in-memory source
pub use crate::metadata::source::{DeclCursor, DeclInfo, SymbolSource, TableSource};

// ================================================================================================
// Registries
// ================================================================================================

/// The registry core and its shared wrapper
pub use crate::metadata::members::{
    ActiveCollection, IdentityIndex, MemberRegistry, SharedMemberRegistry, UnloadedPool,
};
