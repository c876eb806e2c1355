use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::prelude::*;
use serenity::prelude::*;

use super::{format_date, parse_user_id};
use crate::discord::errors::CommandError;

/// Member info card. With no argument it describes the caller.
pub async fn handle_info(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), CommandError> {
    let guild_id = msg.guild_id.ok_or(CommandError::GuildOnly)?;

    let target = match args.first() {
        Some(arg) => parse_user_id(arg).ok_or_else(|| {
            CommandError::InvalidArgument(format!("`{}` is not a member mention or id.", arg))
        })?,
        None => msg.author.id,
    };

    let member = guild_id.member(&ctx.http, target).await?;
    let user = &member.user;

    let description = if target == msg.author.id {
        "See some info about yourself".to_string()
    } else {
        format!("See some info about {}", user.name)
    };

    let joined = member
        .joined_at
        .map(format_date)
        .unwrap_or_else(|| "unknown".to_string());

    let roles_line = {
        let guild = msg.guild(&ctx.cache).ok_or(CommandError::GuildOnly)?;
        let mentions: Vec<String> = member
            .roles
            .iter()
            .filter_map(|role_id| guild.roles.get(role_id))
            .map(|role| role.mention().to_string())
            .collect();
        if mentions.is_empty() {
            "none".to_string()
        } else {
            mentions.join(" ")
        }
    };

    let embed = CreateEmbed::new()
        .thumbnail(user.face())
        .description(description)
        .colour(0x21B0FC)
        .field("User ID", user.id.to_string(), true)
        .field("Account Creation Date", format_date(user.created_at()), true)
        .field("Date User Joined Server", joined, true)
        .field("Roles", roles_line, false)
        .timestamp(Timestamp::now());

    msg.channel_id
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await?;

    Ok(())
}
