//! Member registries: the lazy, identity-indexed cache over a symbol source.
//!
//! This module is the crate's core. A [`MemberRegistry`] reconciles three demands
//! that pull in different directions:
//!
//! - O(1) lookup of member handles both by declaration id and by name;
//! - a backing source whose declarations can disappear and later reappear under a
//!   fresh id but the same name, while external references to the old handles must
//!   keep working;
//! - reentrant population, where describing one member requires looking up another
//!   member of the same registry before loading has finished.
//!
//! # Structure
//!
//! - [`ActiveCollection`] — insertion-ordered, name-hashed collection of live
//!   handles; the iteration order consumers see.
//! - [`IdentityIndex`] — declaration-id map over the same handles.
//! - [`UnloadedPool`] — name-keyed parking lot for handles whose declaration went
//!   away, enabling identity recovery on reload.
//! - [`MemberRegistry`] — the orchestrator owning all three plus the loaded flag.
//! - [`SharedMemberRegistry`] — reentrant-locked wrapper for multi-thread use.
//!
//! The registry keeps the active collection and the id index in lockstep: every
//! insertion or removal path funnels through the registry, never through the
//! collection directly.

mod active;
mod identity;
mod registry;
mod shared;
mod unloaded;

pub use active::ActiveCollection;
pub use identity::IdentityIndex;
pub use registry::MemberRegistry;
pub use shared::SharedMemberRegistry;
pub use unloaded::UnloadedPool;
