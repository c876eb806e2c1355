use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::prelude::*;
use serenity::prelude::*;

use crate::discord::errors::CommandError;

/// Permissions requested in the invite link: everything the command set
/// actually needs.
const INVITE_PERMISSIONS: Permissions = Permissions::VIEW_CHANNEL
    .union(Permissions::SEND_MESSAGES)
    .union(Permissions::READ_MESSAGE_HISTORY)
    .union(Permissions::MANAGE_ROLES)
    .union(Permissions::MANAGE_MESSAGES)
    .union(Permissions::KICK_MEMBERS);

pub async fn handle_invite(ctx: &Context, msg: &Message) -> Result<(), CommandError> {
    let (name, face, bot_id) = {
        let bot = ctx.cache.current_user().clone();
        (bot.name.clone(), bot.face(), bot.id)
    };

    let invite_url = format!(
        "https://discord.com/api/oauth2/authorize?client_id={}&permissions={}&scope=bot",
        bot_id,
        INVITE_PERMISSIONS.bits()
    );

    let embed = CreateEmbed::new()
        .thumbnail(face)
        .colour(0x7289DA)
        .title(format!("Add {} To Your Server", name))
        .description(format!(
            "**Invite {} to your server by clicking the following link: {}**",
            name, invite_url
        ))
        .timestamp(Timestamp::now());

    msg.channel_id
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await?;

    Ok(())
}
