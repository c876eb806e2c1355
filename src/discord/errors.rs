use thiserror::Error;

/// Failures a command handler can report back to the dispatcher.
///
/// `GuildOnly`, `MissingArgument`, `InvalidArgument` and `PermissionDenied`
/// are rendered directly to the invoking user. `Platform` and `Storage`
/// abort the command and are logged; the user only sees a generic failure
/// notice. A role lookup that finds nothing is not an error at this level:
/// resolution returns an `Option` and the command renders its own message.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("This command can only be used in a server.")]
    GuildOnly,

    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("You need the {0} permission to do that.")]
    PermissionDenied(&'static str),

    #[error("Discord API error: {0}")]
    Platform(#[from] serenity::Error),

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl CommandError {
    /// Whether the message of this error is meant for the invoking user.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, CommandError::Platform(_) | CommandError::Storage(_))
    }
}
