use std::sync::Arc;

use log::{debug, error, info};
use serenity::async_trait;
use serenity::model::prelude::*;
use serenity::prelude::*;

use crate::discord::{permissions, registry};
use crate::BotState;

pub struct EventHandler {
    state: Arc<BotState>,
}

impl EventHandler {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl serenity::client::EventHandler for EventHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot || msg.guild_id.is_none() {
            return;
        }

        let prefix = crate::discord::effective_prefix(&self.state, msg.guild_id).await;
        let Some(rest) = msg.content.strip_prefix(&prefix) else {
            return;
        };

        let mut words = rest.split_whitespace();
        let Some(word) = words.next() else {
            return;
        };
        let args: Vec<&str> = words.collect();

        let Some(command) = registry::find_command(word) else {
            debug!("Ignoring unknown command word: {}", word);
            return;
        };

        let caller = match permissions::caller_context(&ctx, &msg).await {
            Ok(caller) => caller,
            Err(e) => {
                error!(
                    "Could not evaluate permissions for {} invoking {}: {}",
                    msg.author.id,
                    command.name(),
                    e
                );
                return;
            }
        };

        if let Err(failed) = permissions::check_preconditions(command.preconditions, &caller) {
            let _ = msg
                .channel_id
                .say(&ctx.http, failed.denial_message())
                .await;
            return;
        }

        debug!("Dispatching {} for {}", command.name(), msg.author.id);
        if let Err(e) = registry::execute_command(command, &ctx, &msg, &args, &self.state).await {
            if e.is_user_facing() {
                let _ = msg.channel_id.say(&ctx.http, e.to_string()).await;
            } else {
                error!("Command {} failed: {}", command.name(), e);
                let _ = msg
                    .channel_id
                    .say(&ctx.http, "Something went wrong while running that command.")
                    .await;
            }
        }
    }
}
