//! Membership directory collaborator.

use async_trait::async_trait;
use rolesweep_core::{AuthorId, FailureReason, RoleId, TargetRole};

/// A live guild membership for an author.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct MemberRecord {
    author: AuthorId,
    roles: Vec<RoleId>,
}

impl MemberRecord {
    /// Create a membership record holding `roles`.
    pub fn new(author: AuthorId, roles: Vec<RoleId>) -> Self {
        Self { author, roles }
    }

    /// Whether the member already holds `role`.
    pub fn has_role(&self, role: RoleId) -> bool {
        self.roles.contains(&role)
    }
}

/// Why the directory refused or failed a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::Error)]
pub enum GrantError {
    /// The platform denied the mutation.
    #[display("Forbidden")]
    Forbidden,
    /// Transport, rate-limit or other HTTP failure.
    #[display("Transport error (status {:?})", status)]
    Transport {
        /// HTTP status code when one was received
        status: Option<u16>,
    },
}

impl From<GrantError> for FailureReason {
    fn from(err: GrantError) -> Self {
        match err {
            GrantError::Forbidden => FailureReason::PermissionDenied,
            GrantError::Transport { status } => FailureReason::Transport { status },
        }
    }
}

/// Resolves authors to guild members and grants roles.
///
/// Implementations perform exactly one network mutation per `grant` call and
/// never retry; pacing is the executor's job.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Look up the author's membership in the target guild.
    ///
    /// Returns `None` when the author is no longer a member.
    async fn resolve(&self, author: AuthorId) -> Option<MemberRecord>;

    /// Grant `role` to `member`, recording `reason` in the audit log.
    async fn grant(
        &self,
        member: &MemberRecord,
        role: &TargetRole,
        reason: &str,
    ) -> Result<(), GrantError>;
}
