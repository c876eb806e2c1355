// src/discord/mod.rs
mod client;
mod commands;
mod events;

pub mod errors;
pub mod help;
pub mod permissions;
pub mod purge;
pub mod registry;
pub mod roles;

pub use client::DiscordClient;

use log::warn;
use serenity::model::prelude::*;

use crate::BotState;

/// The prefix in effect for a guild: its stored override, or the
/// configured default.
pub(crate) async fn effective_prefix(state: &BotState, guild_id: Option<GuildId>) -> String {
    if let Some(guild_id) = guild_id {
        match state.storage.guild_prefix(guild_id.get()) {
            Ok(Some(prefix)) => return prefix,
            Ok(None) => {}
            Err(e) => warn!("Failed to load prefix for guild {}: {}", guild_id, e),
        }
    }

    state.config.read().await.command_prefix.clone()
}
