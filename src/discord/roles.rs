use std::sync::Arc;

use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::prelude::*;

use crate::discord::errors::CommandError;

/// Read-only view of a guild role. The resolver never mutates roles; it
/// only picks one out of the guild-ordered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleEntry {
    pub id: RoleId,
    pub name: String,
    pub mention: String,
}

/// Builds the guild-ordered role view. The platform hands roles over as a
/// map with no stable iteration order, so guild order is defined here as
/// ascending position with the id as tie-break.
pub fn guild_role_entries(guild: &Guild) -> Vec<RoleEntry> {
    let mut roles: Vec<&Role> = guild.roles.values().collect();
    roles.sort_by_key(|role| (role.position, role.id));
    roles
        .into_iter()
        .map(|role| RoleEntry {
            id: role.id,
            name: role.name.clone(),
            mention: role.mention().to_string(),
        })
        .collect()
}

/// Resolves a user-supplied identifier against the guild role set.
///
/// An identifier that parses as an unsigned integer commits to an exact id
/// match; otherwise the name is compared case-insensitively and the first
/// role in guild order wins when names collide. `None` means not found and
/// the caller is expected to tell the user so without mutating anything.
pub fn resolve_role<'a>(roles: &'a [RoleEntry], identifier: &str) -> Option<&'a RoleEntry> {
    if let Ok(role_id) = identifier.parse::<u64>() {
        return roles.iter().find(|role| role.id.get() == role_id);
    }

    let wanted = identifier.to_lowercase();
    roles.iter().find(|role| role.name.to_lowercase() == wanted)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// Role-mutation capability of the platform layer. Implementations touch
/// only the member-role relation, never the role or guild themselves.
#[async_trait]
pub trait RoleEdit {
    async fn add_role(&self, role_id: RoleId) -> Result<(), CommandError>;
    async fn remove_role(&self, role_id: RoleId) -> Result<(), CommandError>;
}

/// Toggles role membership: exactly one mutation request per invocation,
/// removal if the role is currently held, addition otherwise.
///
/// Two near-simultaneous invocations by the same caller can both observe
/// "not held" and both request addition; the platform treats the duplicate
/// add as a no-op but the loser's reported outcome will be wrong. Accepted
/// rather than serialized per (member, role) given how rare a human
/// double-issues the command.
pub async fn toggle_role<E>(
    editor: &E,
    held: &[RoleId],
    role_id: RoleId,
) -> Result<ToggleOutcome, CommandError>
where
    E: RoleEdit + Sync,
{
    if held.contains(&role_id) {
        editor.remove_role(role_id).await?;
        Ok(ToggleOutcome::Removed)
    } else {
        editor.add_role(role_id).await?;
        Ok(ToggleOutcome::Added)
    }
}

/// Serenity-backed [`RoleEdit`] for one member of one guild.
pub struct MemberRoleEdit {
    pub http: Arc<Http>,
    pub guild_id: GuildId,
    pub user_id: UserId,
}

#[async_trait]
impl RoleEdit for MemberRoleEdit {
    async fn add_role(&self, role_id: RoleId) -> Result<(), CommandError> {
        self.http
            .add_member_role(self.guild_id, self.user_id, role_id, None)
            .await?;
        Ok(())
    }

    async fn remove_role(&self, role_id: RoleId) -> Result<(), CommandError> {
        self.http
            .remove_member_role(self.guild_id, self.user_id, role_id, None)
            .await?;
        Ok(())
    }
}
