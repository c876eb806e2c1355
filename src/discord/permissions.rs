use serenity::model::prelude::*;
use serenity::prelude::*;

use crate::discord::errors::CommandError;

/// A pass/fail check gating whether a command may run for a given caller.
///
/// Preconditions are evaluated against a [`CallerContext`] snapshot and
/// must stay free of side effects; evaluation happens once per command
/// invocation and once per command per help listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    RequireUserPermission(Permissions),
    RequireBotPermission(Permissions),
}

impl Precondition {
    pub fn evaluate(&self, caller: &CallerContext) -> bool {
        match self {
            Precondition::RequireUserPermission(required) => {
                caller.user_permissions.contains(*required)
            }
            Precondition::RequireBotPermission(required) => {
                caller.bot_permissions.contains(*required)
            }
        }
    }

    pub fn denial_message(&self) -> String {
        match self {
            Precondition::RequireUserPermission(required) => {
                format!("You need the {:?} permission to use this command.", required)
            }
            Precondition::RequireBotPermission(required) => {
                format!("I am missing the {:?} permission needed for this command.", required)
            }
        }
    }
}

/// Guild-level permissions of the caller and of the bot itself, snapshotted
/// at dispatch time.
#[derive(Debug, Clone, Copy)]
pub struct CallerContext {
    pub user_permissions: Permissions,
    pub bot_permissions: Permissions,
}

/// Evaluates preconditions in order and reports the first failing one.
/// Short-circuiting is fine because preconditions are side-effect free.
pub fn check_preconditions<'a>(
    preconditions: &'a [Precondition],
    caller: &CallerContext,
) -> Result<(), &'a Precondition> {
    for precondition in preconditions {
        if !precondition.evaluate(caller) {
            return Err(precondition);
        }
    }
    Ok(())
}

/// Folds a member's guild-level permission set: the everyone role unioned
/// with each held role, with owner and ADMINISTRATOR expanding to all.
pub fn aggregate_permissions(
    is_owner: bool,
    everyone: Permissions,
    roles: impl IntoIterator<Item = Permissions>,
) -> Permissions {
    if is_owner {
        return Permissions::all();
    }

    let mut permissions = everyone;
    for role_permissions in roles {
        permissions |= role_permissions;
    }

    if permissions.contains(Permissions::ADMINISTRATOR) {
        Permissions::all()
    } else {
        permissions
    }
}

pub fn member_permissions(guild: &Guild, user_id: UserId, role_ids: &[RoleId]) -> Permissions {
    let everyone = guild
        .roles
        .get(&RoleId::new(guild.id.get()))
        .map(|role| role.permissions)
        .unwrap_or_else(Permissions::empty);

    let role_permissions = role_ids
        .iter()
        .filter_map(|id| guild.roles.get(id))
        .map(|role| role.permissions);

    aggregate_permissions(guild.owner_id == user_id, everyone, role_permissions)
}

/// Snapshots the caller's and the bot's guild permissions for one command
/// invocation. The bot's member is fetched over HTTP since the gateway does
/// not guarantee it is cached.
pub async fn caller_context(ctx: &Context, msg: &Message) -> Result<CallerContext, CommandError> {
    let guild_id = msg.guild_id.ok_or(CommandError::GuildOnly)?;
    let bot_id = ctx.cache.current_user().id;

    let user_permissions = {
        let guild = msg.guild(&ctx.cache).ok_or(CommandError::GuildOnly)?;
        let role_ids = msg
            .member
            .as_ref()
            .map(|member| member.roles.clone())
            .unwrap_or_default();
        member_permissions(&guild, msg.author.id, &role_ids)
    };

    let bot_member = guild_id.member(&ctx.http, bot_id).await?;
    let bot_permissions = {
        let guild = msg.guild(&ctx.cache).ok_or(CommandError::GuildOnly)?;
        member_permissions(&guild, bot_id, &bot_member.roles)
    };

    Ok(CallerContext {
        user_permissions,
        bot_permissions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(user: Permissions, bot: Permissions) -> CallerContext {
        CallerContext {
            user_permissions: user,
            bot_permissions: bot,
        }
    }

    #[test]
    fn owner_gets_all_permissions() {
        let permissions = aggregate_permissions(true, Permissions::empty(), []);
        assert_eq!(permissions, Permissions::all());
    }

    #[test]
    fn administrator_expands_to_all_permissions() {
        let permissions =
            aggregate_permissions(false, Permissions::empty(), [Permissions::ADMINISTRATOR]);
        assert_eq!(permissions, Permissions::all());
    }

    #[test]
    fn role_permissions_union_with_everyone() {
        let permissions = aggregate_permissions(
            false,
            Permissions::SEND_MESSAGES,
            [Permissions::MANAGE_MESSAGES, Permissions::KICK_MEMBERS],
        );
        assert!(permissions.contains(Permissions::SEND_MESSAGES));
        assert!(permissions.contains(Permissions::MANAGE_MESSAGES));
        assert!(permissions.contains(Permissions::KICK_MEMBERS));
        assert!(!permissions.contains(Permissions::MANAGE_ROLES));
    }

    #[test]
    fn user_precondition_checks_user_permissions() {
        let precondition = Precondition::RequireUserPermission(Permissions::MANAGE_MESSAGES);
        assert!(precondition.evaluate(&caller(Permissions::MANAGE_MESSAGES, Permissions::empty())));
        assert!(!precondition.evaluate(&caller(Permissions::empty(), Permissions::MANAGE_MESSAGES)));
    }

    #[test]
    fn bot_precondition_checks_bot_permissions() {
        let precondition = Precondition::RequireBotPermission(Permissions::MANAGE_ROLES);
        assert!(precondition.evaluate(&caller(Permissions::empty(), Permissions::MANAGE_ROLES)));
        assert!(!precondition.evaluate(&caller(Permissions::MANAGE_ROLES, Permissions::empty())));
    }

    #[test]
    fn empty_precondition_list_passes() {
        assert!(check_preconditions(&[], &caller(Permissions::empty(), Permissions::empty())).is_ok());
    }

    #[test]
    fn first_failing_precondition_is_reported() {
        let preconditions = [
            Precondition::RequireUserPermission(Permissions::KICK_MEMBERS),
            Precondition::RequireBotPermission(Permissions::KICK_MEMBERS),
        ];

        // Both fail; the user-side check comes first in declaration order.
        let failed = check_preconditions(
            &preconditions,
            &caller(Permissions::empty(), Permissions::empty()),
        )
        .unwrap_err();
        assert_eq!(
            *failed,
            Precondition::RequireUserPermission(Permissions::KICK_MEMBERS)
        );

        // First passes, second fails.
        let failed = check_preconditions(
            &preconditions,
            &caller(Permissions::KICK_MEMBERS, Permissions::empty()),
        )
        .unwrap_err();
        assert_eq!(
            *failed,
            Precondition::RequireBotPermission(Permissions::KICK_MEMBERS)
        );
    }

    #[test]
    fn all_passing_preconditions_succeed() {
        let preconditions = [
            Precondition::RequireUserPermission(Permissions::KICK_MEMBERS),
            Precondition::RequireBotPermission(Permissions::KICK_MEMBERS),
        ];
        assert!(check_preconditions(
            &preconditions,
            &caller(Permissions::KICK_MEMBERS, Permissions::KICK_MEMBERS),
        )
        .is_ok());
    }
}
