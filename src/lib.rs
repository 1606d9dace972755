// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # declscope
//!
//! A lazy, identity-indexed registry of reflective member descriptors backed by a
//! pluggable symbol source.
//!
//! `declscope` sits between a mutable symbol authority — an interpreter or compiler
//! front end that can enumerate, validate, and resynthesize declarations on demand —
//! and consumers that want stable, cheaply-queryable handles to that authority's
//! entries. The hard part it solves is reconciling three demands at once:
//!
//! - **Dual O(1) lookup** by a stable-but-source-scoped declaration id and by name
//! - **Disappearing declarations** - the source can retire a declaration and later
//!   reintroduce it under a fresh id but the same name, while long-lived external
//!   references keep working through the original handle
//! - **Reentrant population** - materializing one member can require looking up a
//!   sibling member of the same registry before population has finished
//!
//! ## Quick Start
//!
//! Add `declscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! declscope = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! ```rust
//! use std::sync::Arc;
//! use declscope::prelude::*;
//!
//! // A symbol source: here the built-in in-memory table
//! let source = Arc::new(TableSource::new());
//! let id = source.add_global("g_counter", MemberPayload {
//!     type_name: "u64".to_string(),
//!     offset: None,
//!     flags: MemberFlags::STATIC,
//! });
//!
//! // A registry over the global scope
//! let mut globals = MemberRegistry::new(source.clone(), None);
//! globals.load();
//!
//! let counter = globals.get(id).expect("declared above");
//! assert_eq!(counter.name(), "g_counter");
//! assert!(counter.is_static());
//! ```
//!
//! ### Surviving a reload
//!
//! The registry's defining behavior: handles keep their identity across the backing
//! declaration disappearing and coming back.
//!
//! ```rust
//! use std::sync::Arc;
//! use declscope::prelude::*;
//!
//! let source = Arc::new(TableSource::new());
//! let old_id = source.add_global("g_mode", MemberPayload::default());
//!
//! let mut globals = MemberRegistry::new(source.clone(), None);
//! let handle = globals.get(old_id).unwrap();
//!
//! // the source reparses: same name, new id
//! globals.unload();
//! source.retire(old_id);
//! let new_id = source.add_global("g_mode", MemberPayload::default());
//!
//! // the original handle comes back, refreshed in place
//! let recovered = globals.get(new_id).unwrap();
//! assert!(Arc::ptr_eq(&handle, &recovered));
//! assert_eq!(handle.declaration_id(), new_id);
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - convenient re-exports of the commonly used types
//! - [`metadata::declid`] - opaque declaration identifiers
//! - [`metadata::scope`] - owner contexts and weak scope back-references
//! - [`metadata::member`] - the mutable member handle
//! - [`metadata::source`] - the [`SymbolSource`](metadata::source::SymbolSource)
//!   seam and the in-memory [`TableSource`](metadata::source::TableSource)
//! - [`metadata::members`] - the registry core and its internal collections
//! - [`Error`] and [`Result`] - error handling
//!
//! ## Error Handling
//!
//! Absence is not an error: lookups for ids or names the source does not recognize
//! return `None`. The [`Error`] enum covers only genuine misuse (see its docs).
//!
//! ## Threading
//!
//! [`MemberRegistry`](metadata::members::MemberRegistry) is single-owner;
//! [`SharedMemberRegistry`](metadata::members::SharedMemberRegistry) serializes a
//! registry behind a reentrant lock for multi-thread use. The bundled
//! [`TableSource`](metadata::source::TableSource) is itself thread-safe.

pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use declscope::prelude::*;
///
/// let source = TableSource::new();
/// let scope = source.add_scope("Config", ScopeShape::Aggregate);
/// assert_eq!(scope.name(), "Config");
/// ```
pub mod prelude;

/// Declaration identifiers, scopes, member handles, sources, and registries
pub mod metadata;

/// `declscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always
/// [`Error`]. Used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `declscope` Error type
///
/// The main error type for all operations in this crate. Deliberately small: lookup
/// misses are `Option` results, not errors.
pub use error::Error;
