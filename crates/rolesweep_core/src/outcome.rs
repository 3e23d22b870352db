//! Per-author assignment outcomes.

use crate::Author;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a role grant for one author did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
    /// Author is no longer a member of the guild.
    MemberNotFound,
    /// The platform refused the grant.
    PermissionDenied,
    /// Transport or rate-limit failure, with the HTTP status when known.
    Transport {
        /// HTTP status code
        status: Option<u16>,
    },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::MemberNotFound => write!(f, "left server?"),
            FailureReason::PermissionDenied => write!(f, "permission denied"),
            FailureReason::Transport { status: Some(status) } => {
                write!(f, "HTTP error: {}", status)
            }
            FailureReason::Transport { status: None } => write!(f, "HTTP error: unknown"),
        }
    }
}

/// Result of processing one eligible author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentOutcome {
    /// The role was granted.
    Assigned,
    /// The member already held the role; no grant was issued.
    AlreadyHadRole,
    /// The grant did not happen.
    Failed(FailureReason),
}

/// A failed author with its reason, as listed in the report.
///
/// # Examples
///
/// ```
/// use rolesweep_core::{Author, AuthorFailure, AuthorId, FailureReason};
///
/// let failure = AuthorFailure::new(
///     Author::new(AuthorId(1), "ada", false),
///     FailureReason::Transport { status: Some(429) },
/// );
/// assert_eq!(failure.to_string(), "ada (HTTP error: 429)");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_more::Display,
)]
#[display("{} ({})", author, reason)]
pub struct AuthorFailure {
    author: Author,
    reason: FailureReason,
}

impl AuthorFailure {
    /// Create a failure entry.
    pub fn new(author: Author, reason: FailureReason) -> Self {
        Self { author, reason }
    }
}
