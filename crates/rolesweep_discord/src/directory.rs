//! Guild member lookups and role grants over the Discord REST API.

use async_trait::async_trait;
use rolesweep_core::{AuthorId, RoleId, TargetRole};
use rolesweep_scan::{GrantError, MemberDirectory, MemberRecord};
use serenity::http::Http;
use serenity::model::id::{GuildId, RoleId as SerenityRoleId, UserId};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

const FORBIDDEN: u16 = 403;
const NOT_FOUND: u16 = 404;

/// Status code of a failed serenity request, when one was received.
fn status_of(err: &serenity::Error) -> Option<u16> {
    match err {
        serenity::Error::Http(http) => http.status_code().map(|s| s.as_u16()),
        _ => None,
    }
}

/// Classify a failed grant by its HTTP status.
pub fn grant_error(status: Option<u16>) -> GrantError {
    match status {
        Some(FORBIDDEN) => GrantError::Forbidden,
        status => GrantError::Transport { status },
    }
}

/// Member directory for a single guild.
#[derive(Clone)]
pub struct GuildDirectory {
    http: Arc<Http>,
    guild_id: GuildId,
}

impl GuildDirectory {
    /// Create a directory for `guild_id`.
    pub fn new(http: Arc<Http>, guild_id: GuildId) -> Self {
        Self { http, guild_id }
    }
}

#[async_trait]
impl MemberDirectory for GuildDirectory {
    #[instrument(skip(self), fields(guild_id = %self.guild_id))]
    async fn resolve(&self, author: AuthorId) -> Option<MemberRecord> {
        match self.http.get_member(self.guild_id, UserId::new(author.0)).await {
            Ok(member) => {
                let roles = member.roles.iter().map(|r| RoleId(r.get())).collect();
                Some(MemberRecord::new(author, roles))
            }
            Err(e) => {
                let status = status_of(&e);
                if status == Some(NOT_FOUND) {
                    debug!(author = %author, "Author is no longer a member");
                } else {
                    warn!(author = %author, ?status, error = %e, "Member lookup failed");
                }
                None
            }
        }
    }

    #[instrument(skip(self, member, role), fields(guild_id = %self.guild_id, author = %member.author(), role = %role.name()))]
    async fn grant(
        &self,
        member: &MemberRecord,
        role: &TargetRole,
        reason: &str,
    ) -> Result<(), GrantError> {
        self.http
            .add_member_role(
                self.guild_id,
                UserId::new(member.author().0),
                SerenityRoleId::new(role.id().0),
                Some(reason),
            )
            .await
            .map_err(|e| {
                let status = status_of(&e);
                debug!(?status, error = %e, "Role grant rejected");
                grant_error(status)
            })
    }
}
