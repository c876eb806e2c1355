use serenity::model::prelude::*;
use serenity::prelude::*;

use crate::discord::errors::CommandError;

/// Echoes the given text and removes the triggering message.
pub async fn handle_say(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), CommandError> {
    if args.is_empty() {
        return Err(CommandError::MissingArgument("text"));
    }

    msg.channel_id.say(&ctx.http, args.join(" ")).await?;
    msg.delete(&ctx.http).await?;

    Ok(())
}
