use std::sync::Arc;

use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::prelude::*;
use serenity::prelude::*;

use crate::discord::help::build_help;
use crate::discord::permissions::caller_context;
use crate::discord::registry::{HandlerFuture, MODULES};
use crate::BotState;

/// Lists the commands the caller can actually use, grouped by module.
///
/// Returns the boxed handler future directly: the handler reads `MODULES`,
/// so an `async fn` here would make the registry's hidden future type
/// depend on itself.
pub fn handle_help<'a>(
    ctx: &'a Context,
    msg: &'a Message,
    state: &'a Arc<BotState>,
) -> HandlerFuture<'a> {
    Box::pin(async move {
        let caller = caller_context(ctx, msg).await?;
        let prefix = crate::discord::effective_prefix(state, msg.guild_id).await;

        let sections = build_help(MODULES, &caller, &prefix);

        let mut embed = CreateEmbed::new()
            .colour(0x7289DA)
            .description("These are the commands you can use");
        for section in &sections {
            embed = embed.field(
                format!("__**{}**__", section.module),
                section.body.as_str(),
                false,
            );
        }

        msg.channel_id
            .send_message(&ctx.http, CreateMessage::new().embed(embed))
            .await?;

        Ok(())
    })
}
