use serenity::model::prelude::*;
use serenity::prelude::*;

use super::parse_user_id;
use crate::discord::errors::CommandError;

pub async fn handle_kick(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), CommandError> {
    let guild_id = msg.guild_id.ok_or(CommandError::GuildOnly)?;

    let arg = args.first().ok_or(CommandError::MissingArgument("member"))?;
    let user_id = parse_user_id(arg).ok_or_else(|| {
        CommandError::InvalidArgument(format!("`{}` is not a member mention or id.", arg))
    })?;

    // Farewell only once the kick has gone through.
    guild_id.kick(&ctx.http, user_id).await?;
    msg.channel_id
        .say(&ctx.http, format!("Cya {}", user_id.mention()))
        .await?;

    Ok(())
}
