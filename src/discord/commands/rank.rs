use serenity::model::prelude::*;
use serenity::prelude::*;

use crate::discord::errors::CommandError;
use crate::discord::roles::{
    guild_role_entries, resolve_role, toggle_role, MemberRoleEdit, RoleEntry, ToggleOutcome,
};

/// Toggles a self-assignable rank on the caller. The identifier is either
/// a role id or a role name; names may contain spaces.
pub async fn handle_rank(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), CommandError> {
    let guild_id = msg.guild_id.ok_or(CommandError::GuildOnly)?;

    let identifier = args.join(" ");
    if identifier.is_empty() {
        return Err(CommandError::MissingArgument("role name or id"));
    }

    let _ = msg.channel_id.broadcast_typing(&ctx.http).await;

    let resolved: Option<RoleEntry> = {
        let guild = msg.guild(&ctx.cache).ok_or(CommandError::GuildOnly)?;
        let entries = guild_role_entries(&guild);
        resolve_role(&entries, &identifier).cloned()
    };

    let Some(role) = resolved else {
        msg.channel_id
            .say(&ctx.http, "That role does not exist!")
            .await?;
        return Ok(());
    };

    let held: Vec<RoleId> = msg
        .member
        .as_ref()
        .map(|member| member.roles.clone())
        .unwrap_or_default();

    let editor = MemberRoleEdit {
        http: ctx.http.clone(),
        guild_id,
        user_id: msg.author.id,
    };

    let confirmation = match toggle_role(&editor, &held, role.id).await? {
        ToggleOutcome::Added => format!("Successfully added the rank {} to you.", role.mention),
        ToggleOutcome::Removed => {
            format!("Successfully removed the rank {} from you.", role.mention)
        }
    };
    msg.channel_id.say(&ctx.http, confirmation).await?;

    Ok(())
}
