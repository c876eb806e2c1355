use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::prelude::*;
use serenity::prelude::*;

use super::format_date;
use crate::discord::errors::CommandError;

pub async fn handle_botinfo(ctx: &Context, msg: &Message) -> Result<(), CommandError> {
    let (name, face, created_at) = {
        let bot = ctx.cache.current_user().clone();
        (bot.name.clone(), bot.face(), bot.id.created_at())
    };

    let embed = CreateEmbed::new()
        .thumbnail(face)
        .colour(0x000000)
        .field("Name:", name, false)
        .field("Bot created on:", format_date(created_at), true)
        .field("Written with:", "Rust + serenity", true)
        .timestamp(Timestamp::now());

    msg.channel_id
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await?;

    Ok(())
}
