use serenity::model::prelude::*;
use serenity::prelude::*;

use crate::discord::errors::CommandError;

pub async fn handle_ping(ctx: &Context, msg: &Message) -> Result<(), CommandError> {
    msg.channel_id.say(&ctx.http, "Pong!").await?;
    Ok(())
}
