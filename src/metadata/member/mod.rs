//! Member handles — the registry's mutable records for reflective members.
//!
//! A [`Member`] describes one data field of an aggregate scope, or one global
//! variable when it has no owner. Handles are shared via [`MemberRc`]; the allocation
//! is the member's identity and stays stable across reload, while the payload and
//! declaration id are refreshed in place through [`Member::update`].

use bitflags::bitflags;
use std::sync::Arc;

mod owned;

pub use owned::{Member, MemberPayload};

/// A shared reference to a [`Member`].
pub type MemberRc = Arc<Member>;
/// A list of shared member references.
pub type MemberList = Vec<MemberRc>;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    /// Property bits describing a member declaration.
    pub struct MemberFlags: u32 {
        /// Member is visible to everyone.
        const PUBLIC = 0x0001;
        /// Member is visible to the declaring scope and its descendants.
        const PROTECTED = 0x0002;
        /// Member is visible only inside the declaring scope.
        const PRIVATE = 0x0004;
        /// Member is per-scope rather than per-instance.
        const STATIC = 0x0010;
        /// Member cannot be written after initialization.
        const CONST = 0x0020;
        /// Member's declared type is a pointer type.
        const POINTER = 0x0100;
        /// Member's declared type is an array type.
        const ARRAY = 0x0200;
        /// Member's declared type is an enumeration.
        const ENUM = 0x0400;
    }
}

/// Access level of a member, extracted from its [`MemberFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum MemberAccess {
    /// Visible to everyone.
    Public,
    /// Visible to the declaring scope and its descendants.
    Protected,
    /// Visible only inside the declaring scope.
    Private,
}

impl MemberAccess {
    /// Extracts the access level from raw member flags.
    ///
    /// Flag sets carrying more than one access bit resolve to the most restrictive
    /// level; a set carrying none reads as `Private`.
    #[must_use]
    pub fn from_flags(flags: MemberFlags) -> Self {
        if flags.contains(MemberFlags::PRIVATE) {
            MemberAccess::Private
        } else if flags.contains(MemberFlags::PROTECTED) {
            MemberAccess::Protected
        } else if flags.contains(MemberFlags::PUBLIC) {
            MemberAccess::Public
        } else {
            MemberAccess::Private
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_from_flags() {
        assert_eq!(
            MemberAccess::from_flags(MemberFlags::PUBLIC | MemberFlags::STATIC),
            MemberAccess::Public
        );
        assert_eq!(
            MemberAccess::from_flags(MemberFlags::PROTECTED),
            MemberAccess::Protected
        );
        assert_eq!(
            MemberAccess::from_flags(MemberFlags::PRIVATE | MemberFlags::PUBLIC),
            MemberAccess::Private
        );
        assert_eq!(
            MemberAccess::from_flags(MemberFlags::empty()),
            MemberAccess::Private
        );
    }

    #[test]
    fn test_access_display() {
        assert_eq!(MemberAccess::Public.to_string(), "Public");
        assert_eq!(MemberAccess::Private.to_string(), "Private");
    }
}
