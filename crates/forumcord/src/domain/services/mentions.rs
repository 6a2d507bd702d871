//! Mention extraction
//!
//! Raw Discord mention tokens found in forum text are collected into a
//! display list (the embed `content` line) and re-enabled for pinging via
//! an explicit allowed-mentions policy.

use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::entities::AllowedMentions;

lazy_static! {
    static ref MENTION_TOKEN: Regex =
        Regex::new(r"(<@&\d+>|<@\d+>|<#\d+>|@here|@everyone)").unwrap();
}

/// Every raw mention token (role, user, channel, `@here`, `@everyone`) in
/// first-appearance order, duplicates retained, joined with `", "`.
pub fn extract(text: &str) -> String {
    MENTION_TOKEN
        .find_iter(text)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The mention categories Discord is permitted to actually notify
pub fn allowed_mentions() -> AllowedMentions {
    AllowedMentions {
        parse: vec![
            "everyone".to_string(),
            "users".to_string(),
            "roles".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_in_order_with_duplicates() {
        let text = "ping <@111> and <@222>, also @everyone and <@111>";
        assert_eq!(extract(text), "<@111>, <@222>, @everyone, <@111>");
    }

    #[test]
    fn test_extract_role_and_channel_tokens() {
        assert_eq!(extract("see <#42> cc <@&9> @here"), "<#42>, <@&9>, @here");
    }

    #[test]
    fn test_extract_empty() {
        assert_eq!(extract("no pings here"), "");
    }

    #[test]
    fn test_allowed_mentions_policy() {
        let policy = allowed_mentions();
        assert_eq!(policy.parse, vec!["everyone", "users", "roles"]);
    }
}
