use std::sync::Arc;

use serenity::model::prelude::*;
use serenity::prelude::*;

use crate::discord::errors::CommandError;
use crate::discord::permissions::caller_context;
use crate::BotState;

const MAX_PREFIX_LEN: usize = 8;

/// Shows the current prefix, or sets a new one for this guild. Anyone may
/// look; changing it takes Manage Server.
pub async fn handle_prefix(
    ctx: &Context,
    msg: &Message,
    args: &[&str],
    state: &Arc<BotState>,
) -> Result<(), CommandError> {
    let guild_id = msg.guild_id.ok_or(CommandError::GuildOnly)?;

    match args.first() {
        None => {
            let prefix = crate::discord::effective_prefix(state, Some(guild_id)).await;
            msg.channel_id
                .say(&ctx.http, format!("The command prefix here is `{}`", prefix))
                .await?;
        }
        Some(new_prefix) => {
            let caller = caller_context(ctx, msg).await?;
            if !caller.user_permissions.contains(Permissions::MANAGE_GUILD) {
                return Err(CommandError::PermissionDenied("Manage Server"));
            }
            if new_prefix.len() > MAX_PREFIX_LEN {
                return Err(CommandError::InvalidArgument(format!(
                    "The prefix must be at most {} characters.",
                    MAX_PREFIX_LEN
                )));
            }

            state.storage.set_guild_prefix(guild_id.get(), new_prefix)?;
            msg.channel_id
                .say(&ctx.http, format!("Command prefix set to `{}`", new_prefix))
                .await?;
        }
    }

    Ok(())
}
