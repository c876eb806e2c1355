use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::prelude::*;
use serenity::prelude::*;

use super::format_date;
use crate::discord::errors::CommandError;

pub async fn handle_server(ctx: &Context, msg: &Message) -> Result<(), CommandError> {
    let (name, icon_url, created_at, member_count) = {
        let guild = msg.guild(&ctx.cache).ok_or(CommandError::GuildOnly)?;
        (
            guild.name.clone(),
            guild.icon_url(),
            guild.id.created_at(),
            guild.member_count,
        )
    };

    let mut embed = CreateEmbed::new()
        .title(format!("{} Server Stats", name))
        .description("Server Information")
        .colour(0x21B0FC)
        .field("Created At", format_date(created_at), true)
        .field("Member Count", format!("{} members", member_count), true);
    if let Some(icon_url) = icon_url {
        embed = embed.thumbnail(icon_url);
    }

    msg.channel_id
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await?;

    Ok(())
}
