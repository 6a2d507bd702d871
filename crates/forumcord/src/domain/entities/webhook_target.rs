//! WebhookTarget - one configured Discord webhook destination
//!
//! A target pairs an endpoint URL with its watch predicate (event flags,
//! forum scope, usergroup gate) and its presentation settings (embeds,
//! colors, templates, character limit).

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ForumScope, IdSet, WatchedEvents};

/// Hard ceiling on configured targets; the registry cache reads this many.
pub const MAX_TARGETS: i64 = 100;

/// Discord's content length ceiling.
pub const MAX_CHARACTER_LIMIT: i32 = 2000;

lazy_static! {
    static ref WEBHOOK_URL: Regex =
        Regex::new(r"(?i)^https://discord\.com/api/webhooks/\d+/[\w-]+$").unwrap();
    static ref WEBHOOK_ID: Regex = Regex::new(r"/webhooks/(\d+)/").unwrap();
}

/// True iff the URL matches Discord's incoming-webhook shape
pub fn is_webhook_url(url: &str) -> bool {
    WEBHOOK_URL.is_match(url)
}

/// The webhook id segment of an endpoint URL. Message log entries carry
/// the webhook id Discord reported, so this is how a target recognizes
/// its own entries.
pub fn webhook_id_from_url(url: &str) -> Option<&str> {
    WEBHOOK_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// One configured outbound webhook destination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebhookTarget {
    pub id: i64,
    /// Discord incoming-webhook endpoint, unique across targets
    pub endpoint_url: String,
    /// Admin-facing label, not wire-relevant
    pub display_name: Option<String>,
    /// Rich-embed delivery vs plain content
    pub use_embeds: bool,
    pub embed_color: Option<String>,
    pub embed_thumbnail_url: Option<String>,
    pub embed_footer_text: Option<String>,
    pub embed_footer_icon_url: Option<String>,
    /// Overrides the generated text when present
    pub message_template: Option<String>,
    /// Template supplements the default content instead of replacing it
    pub message_template_append: bool,
    /// Surface extracted mention tokens as pingable content
    pub allow_mentions: bool,
    /// Hard cap enforced on the final translated text, 1..=2000
    pub character_limit: i32,
    pub watched_events: WatchedEvents,
    pub watched_forums: ForumScope,
    /// Usergroups whose members may trigger this target
    pub watched_usergroups: IdSet,
    /// Host user whose name/avatar become the payload sender identity
    pub bot_user_id: i64,
}

/// Fields for creating a target; the registry assigns the id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWebhookTarget {
    pub endpoint_url: String,
    pub display_name: Option<String>,
    pub use_embeds: bool,
    pub embed_color: Option<String>,
    pub embed_thumbnail_url: Option<String>,
    pub embed_footer_text: Option<String>,
    pub embed_footer_icon_url: Option<String>,
    pub message_template: Option<String>,
    pub message_template_append: bool,
    pub allow_mentions: bool,
    pub character_limit: i32,
    pub watched_events: WatchedEvents,
    pub watched_forums: ForumScope,
    pub watched_usergroups: IdSet,
    pub bot_user_id: i64,
}

/// Partial update; only set fields are rewritten
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookTargetPatch {
    pub endpoint_url: Option<String>,
    pub display_name: Option<Option<String>>,
    pub use_embeds: Option<bool>,
    pub embed_color: Option<Option<String>>,
    pub embed_thumbnail_url: Option<Option<String>>,
    pub embed_footer_text: Option<Option<String>>,
    pub embed_footer_icon_url: Option<Option<String>>,
    pub message_template: Option<Option<String>>,
    pub message_template_append: Option<bool>,
    pub allow_mentions: Option<bool>,
    pub character_limit: Option<i32>,
    pub watched_events: Option<WatchedEvents>,
    pub watched_forums: Option<ForumScope>,
    pub watched_usergroups: Option<IdSet>,
    pub bot_user_id: Option<i64>,
}

impl WebhookTarget {
    /// Apply a partial update in place
    pub fn apply(&mut self, patch: WebhookTargetPatch) {
        if let Some(url) = patch.endpoint_url {
            self.endpoint_url = url;
        }
        if let Some(name) = patch.display_name {
            self.display_name = name;
        }
        if let Some(use_embeds) = patch.use_embeds {
            self.use_embeds = use_embeds;
        }
        if let Some(color) = patch.embed_color {
            self.embed_color = color;
        }
        if let Some(thumbnail) = patch.embed_thumbnail_url {
            self.embed_thumbnail_url = thumbnail;
        }
        if let Some(text) = patch.embed_footer_text {
            self.embed_footer_text = text;
        }
        if let Some(icon) = patch.embed_footer_icon_url {
            self.embed_footer_icon_url = icon;
        }
        if let Some(template) = patch.message_template {
            self.message_template = template;
        }
        if let Some(append) = patch.message_template_append {
            self.message_template_append = append;
        }
        if let Some(allow) = patch.allow_mentions {
            self.allow_mentions = allow;
        }
        if let Some(limit) = patch.character_limit {
            self.character_limit = limit;
        }
        if let Some(events) = patch.watched_events {
            self.watched_events = events;
        }
        if let Some(forums) = patch.watched_forums {
            self.watched_forums = forums;
        }
        if let Some(groups) = patch.watched_usergroups {
            self.watched_usergroups = groups;
        }
        if let Some(bot) = patch.bot_user_id {
            self.bot_user_id = bot;
        }
    }
}

/// Resolved sender identity attached to a cached target
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BotIdentity {
    pub user_id: i64,
    pub username: String,
    pub avatar_url: String,
}

impl BotIdentity {
    /// Placeholder identity for a deleted or missing host user
    pub fn not_available() -> Self {
        Self {
            user_id: 0,
            username: "N/A".to_string(),
            avatar_url: String::new(),
        }
    }
}

/// Denormalized registry snapshot entry: decoded target plus its resolved
/// bot identity. Rebuilt wholesale on every target mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CachedTarget {
    pub target: WebhookTarget,
    pub bot: BotIdentity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_url_shape() {
        assert!(is_webhook_url(
            "https://discord.com/api/webhooks/123456/aBc-dEf_123"
        ));
        assert!(!is_webhook_url("https://discord.com/api/webhooks/123456/"));
        assert!(!is_webhook_url("https://example.com/api/webhooks/1/token"));
        assert!(!is_webhook_url("discord.com/api/webhooks/1/token"));
    }

    #[test]
    fn test_webhook_id_extraction() {
        assert_eq!(
            webhook_id_from_url("https://discord.com/api/webhooks/123456/aBc-dEf_123"),
            Some("123456")
        );
        assert_eq!(
            webhook_id_from_url("https://discord.com/api/webhooks/99/tok?wait=true"),
            Some("99")
        );
        assert_eq!(webhook_id_from_url("https://example.com/other"), None);
    }

    #[test]
    fn test_patch_rewrites_only_set_fields() {
        let mut target = WebhookTarget {
            id: 1,
            endpoint_url: "https://discord.com/api/webhooks/1/a".to_string(),
            display_name: Some("general".to_string()),
            use_embeds: false,
            embed_color: None,
            embed_thumbnail_url: None,
            embed_footer_text: None,
            embed_footer_icon_url: None,
            message_template: None,
            message_template_append: false,
            allow_mentions: false,
            character_limit: 500,
            watched_events: WatchedEvents::default(),
            watched_forums: ForumScope::All,
            watched_usergroups: IdSet::default(),
            bot_user_id: 7,
        };

        target.apply(WebhookTargetPatch {
            character_limit: Some(2000),
            display_name: Some(None),
            ..Default::default()
        });

        assert_eq!(target.character_limit, 2000);
        assert_eq!(target.display_name, None);
        assert_eq!(target.bot_user_id, 7);
        assert_eq!(target.watched_forums, ForumScope::All);
    }
}
