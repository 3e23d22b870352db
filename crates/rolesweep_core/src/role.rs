//! Roles and their position in the guild hierarchy.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Platform identifier of a role.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct RoleId(pub u64);

/// Rank of a role in the hierarchy.
///
/// Higher `position` ranks higher. On a position tie the older role (lower
/// id) ranks higher, matching how the platform orders roles.
///
/// # Examples
///
/// ```
/// use rolesweep_core::{RoleId, RoleRank};
///
/// let bot = RoleRank::new(5, RoleId(10));
/// let prize = RoleRank::new(3, RoleId(20));
/// assert!(prize < bot);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct RoleRank {
    position: u16,
    id: RoleId,
}

impl RoleRank {
    /// Create a rank from a position and the role's id.
    pub fn new(position: u16, id: RoleId) -> Self {
        Self { position, id }
    }
}

impl Ord for RoleRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position
            .cmp(&other.position)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for RoleRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The role a scan grants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct TargetRole {
    id: RoleId,
    name: String,
    rank: RoleRank,
}

impl TargetRole {
    /// Create a target role.
    pub fn new(id: RoleId, name: impl Into<String>, position: u16) -> Self {
        Self {
            id,
            name: name.into(),
            rank: RoleRank::new(position, id),
        }
    }

    /// Whether a principal whose highest role is `top` may grant this role.
    pub fn is_grantable_below(&self, top: &RoleRank) -> bool {
        self.rank < *top
    }
}
