use std::sync::Arc;

use serenity::model::prelude::*;
use serenity::prelude::*;

use crate::discord::errors::CommandError;
use crate::discord::purge::{purge_messages, ChannelMessages};

pub async fn handle_purge(ctx: &Context, msg: &Message, args: &[&str]) -> Result<(), CommandError> {
    let amount: u64 = args
        .first()
        .ok_or(CommandError::MissingArgument("amount"))?
        .parse()
        .map_err(|_| {
            CommandError::InvalidArgument("The amount must be a positive integer.".to_string())
        })?;

    let channel = Arc::new(ChannelMessages {
        http: ctx.http.clone(),
        channel_id: msg.channel_id,
    });
    purge_messages(&channel, amount).await?;

    Ok(())
}
