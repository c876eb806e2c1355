pub mod botinfo;
pub mod help;
pub mod info;
pub mod invite;
pub mod kick;
pub mod ping;
pub mod prefix;
pub mod purge;
pub mod rank;
pub mod say;
pub mod server;

use serenity::model::prelude::*;

/// Accepts a raw id, `<@id>` or `<@!id>` mention.
pub(crate) fn parse_user_id(arg: &str) -> Option<UserId> {
    let trimmed = arg
        .trim_start_matches("<@!")
        .trim_start_matches("<@")
        .trim_end_matches('>');
    trimmed
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(UserId::new)
}

pub(crate) fn format_date(timestamp: Timestamp) -> String {
    chrono::DateTime::from_timestamp(timestamp.unix_timestamp(), 0)
        .map(|date| date.format("%Y/%m/%d").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_raw_ids_and_mentions() {
        assert_eq!(parse_user_id("123"), Some(UserId::new(123)));
        assert_eq!(parse_user_id("<@123>"), Some(UserId::new(123)));
        assert_eq!(parse_user_id("<@!123>"), Some(UserId::new(123)));
        assert_eq!(parse_user_id("not-a-user"), None);
        assert_eq!(parse_user_id("<@>"), None);
    }
}
