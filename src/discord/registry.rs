use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serenity::model::prelude::*;
use serenity::prelude::*;

use super::commands;
use crate::discord::errors::CommandError;
use crate::discord::permissions::Precondition;
use crate::BotState;

pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<(), CommandError>> + Send + 'a>>;

/// One registered command. Aliases are never empty; the first alias is the
/// canonical name shown in help listings.
pub struct Command {
    pub aliases: &'static [&'static str],
    pub summary: &'static str,
    pub preconditions: &'static [Precondition],
    pub handler: for<'a> fn(
        &'a Context,
        &'a Message,
        &'a [&'a str],
        &'a Arc<BotState>,
    ) -> HandlerFuture<'a>,
}

impl Command {
    pub fn name(&self) -> &'static str {
        self.aliases[0]
    }

    pub fn matches(&self, word: &str) -> bool {
        self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(word))
    }
}

pub struct Module {
    pub name: &'static str,
    pub commands: &'static [Command],
}

/// The full command registry, built once at compile time and iterated in
/// declaration order everywhere (dispatch and help alike).
pub const MODULES: &[Module] = &[
    Module {
        name: "General",
        commands: &[
            Command {
                aliases: &["ping"],
                summary: "Ping the bot",
                preconditions: &[],
                handler: |ctx, msg, _args, _state| Box::pin(commands::ping::handle_ping(ctx, msg)),
            },
            Command {
                aliases: &["info", "whois"],
                summary: "See information about a fellow member",
                preconditions: &[],
                handler: |ctx, msg, args, _state| Box::pin(commands::info::handle_info(ctx, msg, args)),
            },
            Command {
                aliases: &["server", "serverinfo"],
                summary: "View information about the server",
                preconditions: &[],
                handler: |ctx, msg, _args, _state| Box::pin(commands::server::handle_server(ctx, msg)),
            },
            Command {
                aliases: &["botinfo"],
                summary: "Display info about this bot",
                preconditions: &[],
                handler: |ctx, msg, _args, _state| Box::pin(commands::botinfo::handle_botinfo(ctx, msg)),
            },
            Command {
                aliases: &["invite"],
                summary: "Information on how to add this bot to your own server",
                preconditions: &[],
                handler: |ctx, msg, _args, _state| Box::pin(commands::invite::handle_invite(ctx, msg)),
            },
            Command {
                aliases: &["say"],
                summary: "Make the bot say something",
                preconditions: &[Precondition::RequireUserPermission(Permissions::ADMINISTRATOR)],
                handler: |ctx, msg, args, _state| Box::pin(commands::say::handle_say(ctx, msg, args)),
            },
            Command {
                aliases: &["rank", "role"],
                summary: "Add or remove a rank/role from yourself",
                preconditions: &[Precondition::RequireBotPermission(Permissions::MANAGE_ROLES)],
                handler: |ctx, msg, args, _state| Box::pin(commands::rank::handle_rank(ctx, msg, args)),
            },
            Command {
                aliases: &["help", "commands"],
                summary: "Displays a list of commands",
                preconditions: &[],
                handler: |ctx, msg, _args, state| commands::help::handle_help(ctx, msg, state),
            },
        ],
    },
    Module {
        name: "Moderation",
        commands: &[
            Command {
                aliases: &["purge", "clear"],
                summary: "Delete a number of recent messages",
                preconditions: &[Precondition::RequireUserPermission(Permissions::MANAGE_MESSAGES)],
                handler: |ctx, msg, args, _state| Box::pin(commands::purge::handle_purge(ctx, msg, args)),
            },
            Command {
                aliases: &["kick"],
                summary: "Kick a member from the server",
                preconditions: &[
                    Precondition::RequireUserPermission(Permissions::KICK_MEMBERS),
                    Precondition::RequireBotPermission(Permissions::KICK_MEMBERS),
                ],
                handler: |ctx, msg, args, _state| Box::pin(commands::kick::handle_kick(ctx, msg, args)),
            },
        ],
    },
    Module {
        name: "Configuration",
        commands: &[
            Command {
                aliases: &["prefix"],
                summary: "Show or change the command prefix for this server",
                preconditions: &[],
                handler: |ctx, msg, args, state| Box::pin(commands::prefix::handle_prefix(ctx, msg, args, state)),
            },
        ],
    },
];

pub fn find_command(word: &str) -> Option<&'static Command> {
    MODULES
        .iter()
        .flat_map(|module| module.commands)
        .find(|command| command.matches(word))
}

pub async fn execute_command(
    command: &Command,
    ctx: &Context,
    msg: &Message,
    args: &[&str],
    state: &Arc<BotState>,
) -> Result<(), CommandError> {
    (command.handler)(ctx, msg, args, state).await
}
