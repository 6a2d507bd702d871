//! Webhook target DTOs

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use forumcord::domain::value_objects::{ForumScope, IdSet, WatchedEvents};
use forumcord::{DomainError, EventKind, NewWebhookTarget, WebhookTarget, WebhookTargetPatch};

fn default_character_limit() -> i32 {
    500
}

/// Request to register a new webhook target
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWebhookRequest {
    /// Discord incoming-webhook URL
    pub url: String,
    /// Admin-facing label
    pub name: Option<String>,
    /// Deliver rich embeds instead of plain text
    #[serde(default)]
    pub use_embeds: bool,
    /// Embed border color as `#rrggbb`
    pub embed_color: Option<String>,
    pub embed_thumbnail_url: Option<String>,
    pub embed_footer_text: Option<String>,
    pub embed_footer_icon_url: Option<String>,
    /// Custom body with `{token}` placeholders
    pub message_template: Option<String>,
    /// Append the template to the generated body instead of replacing it
    #[serde(default)]
    pub message_template_append: bool,
    #[serde(default)]
    pub allow_mentions: bool,
    /// Cap on the translated text (default: 500)
    #[serde(default = "default_character_limit")]
    pub character_limit: i32,
    /// Event kinds to relay, e.g. "new_thread", "delete_post"
    #[serde(default)]
    pub events: Vec<String>,
    /// Watched forum ids; `[-1]` watches every forum
    #[serde(default)]
    pub watch_forums: Vec<i64>,
    /// Usergroups whose members trigger delivery; empty means everyone
    #[serde(default)]
    pub watch_usergroups: Vec<i64>,
    /// Board user whose name and avatar sign the messages
    pub bot_user_id: i64,
}

impl CreateWebhookRequest {
    pub fn into_domain(self) -> Result<NewWebhookTarget, DomainError> {
        Ok(NewWebhookTarget {
            endpoint_url: self.url,
            display_name: non_empty(self.name),
            use_embeds: self.use_embeds,
            embed_color: non_empty(self.embed_color),
            embed_thumbnail_url: non_empty(self.embed_thumbnail_url),
            embed_footer_text: non_empty(self.embed_footer_text),
            embed_footer_icon_url: non_empty(self.embed_footer_icon_url),
            message_template: non_empty(self.message_template),
            message_template_append: self.message_template_append,
            allow_mentions: self.allow_mentions,
            character_limit: self.character_limit,
            watched_events: parse_watched_events(&self.events)?,
            watched_forums: forum_scope_from_ids(self.watch_forums),
            watched_usergroups: IdSet(self.watch_usergroups),
            bot_user_id: self.bot_user_id,
        })
    }
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateWebhookRequest {
    pub url: Option<String>,
    /// Empty string clears the label
    pub name: Option<String>,
    pub use_embeds: Option<bool>,
    /// Empty string clears the color
    pub embed_color: Option<String>,
    pub embed_thumbnail_url: Option<String>,
    pub embed_footer_text: Option<String>,
    pub embed_footer_icon_url: Option<String>,
    pub message_template: Option<String>,
    pub message_template_append: Option<bool>,
    pub allow_mentions: Option<bool>,
    pub character_limit: Option<i32>,
    pub events: Option<Vec<String>>,
    pub watch_forums: Option<Vec<i64>>,
    pub watch_usergroups: Option<Vec<i64>>,
    pub bot_user_id: Option<i64>,
}

impl UpdateWebhookRequest {
    pub fn into_patch(self) -> Result<WebhookTargetPatch, DomainError> {
        let watched_events = match self.events {
            Some(events) => Some(parse_watched_events(&events)?),
            None => None,
        };
        Ok(WebhookTargetPatch {
            endpoint_url: self.url,
            display_name: self.name.map(|v| non_empty(Some(v))),
            use_embeds: self.use_embeds,
            embed_color: self.embed_color.map(|v| non_empty(Some(v))),
            embed_thumbnail_url: self.embed_thumbnail_url.map(|v| non_empty(Some(v))),
            embed_footer_text: self.embed_footer_text.map(|v| non_empty(Some(v))),
            embed_footer_icon_url: self.embed_footer_icon_url.map(|v| non_empty(Some(v))),
            message_template: self.message_template.map(|v| non_empty(Some(v))),
            message_template_append: self.message_template_append,
            allow_mentions: self.allow_mentions,
            character_limit: self.character_limit,
            watched_events,
            watched_forums: self.watch_forums.map(forum_scope_from_ids),
            watched_usergroups: self.watch_usergroups.map(IdSet),
            bot_user_id: self.bot_user_id,
        })
    }
}

/// Webhook target response
#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookResponse {
    pub id: i64,
    pub url: String,
    pub name: Option<String>,
    pub use_embeds: bool,
    pub embed_color: Option<String>,
    pub embed_thumbnail_url: Option<String>,
    pub embed_footer_text: Option<String>,
    pub embed_footer_icon_url: Option<String>,
    pub message_template: Option<String>,
    pub message_template_append: bool,
    pub allow_mentions: bool,
    pub character_limit: i32,
    pub events: Vec<String>,
    pub watch_forums: Vec<i64>,
    pub watch_usergroups: Vec<i64>,
    pub bot_user_id: i64,
}

impl WebhookResponse {
    pub fn from_domain(target: WebhookTarget) -> Self {
        Self {
            id: target.id,
            url: target.endpoint_url,
            name: target.display_name,
            use_embeds: target.use_embeds,
            embed_color: target.embed_color,
            embed_thumbnail_url: target.embed_thumbnail_url,
            embed_footer_text: target.embed_footer_text,
            embed_footer_icon_url: target.embed_footer_icon_url,
            message_template: target.message_template,
            message_template_append: target.message_template_append,
            allow_mentions: target.allow_mentions,
            character_limit: target.character_limit,
            events: event_names(&target.watched_events),
            watch_forums: match target.watched_forums {
                ForumScope::All => vec![-1],
                ForumScope::Forums(ids) => ids,
            },
            watch_usergroups: target.watched_usergroups.0,
            bot_user_id: target.bot_user_id,
        }
    }
}

/// One page of webhook targets
#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookListResponse {
    pub webhooks: Vec<WebhookResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// Bulk delete request
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteWebhooksRequest {
    pub ids: Vec<i64>,
}

/// Bulk delete outcome
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteWebhooksResponse {
    pub removed: u64,
}

/// Snapshot rebuild outcome
#[derive(Debug, Serialize, ToSchema)]
pub struct RebuildResponse {
    pub targets: usize,
}

/// Fold event kind names into watch flags; unknown names are rejected
pub fn parse_watched_events(names: &[String]) -> Result<WatchedEvents, DomainError> {
    let mut events = WatchedEvents::default();
    for name in names {
        let kind = EventKind::from_str(name).map_err(DomainError::Validation)?;
        match kind {
            EventKind::NewThread => events.new_threads = true,
            EventKind::NewPost => events.new_posts = true,
            EventKind::EditThread => events.edit_threads = true,
            EventKind::EditPost => events.edit_posts = true,
            EventKind::DeleteThread => events.delete_threads = true,
            EventKind::DeletePost => events.delete_posts = true,
            EventKind::NewRegistration => events.new_registrations = true,
        }
    }
    Ok(events)
}

fn event_names(events: &WatchedEvents) -> Vec<String> {
    let kinds = [
        (events.new_threads, EventKind::NewThread),
        (events.new_posts, EventKind::NewPost),
        (events.edit_threads, EventKind::EditThread),
        (events.edit_posts, EventKind::EditPost),
        (events.delete_threads, EventKind::DeleteThread),
        (events.delete_posts, EventKind::DeletePost),
        (events.new_registrations, EventKind::NewRegistration),
    ];
    kinds
        .into_iter()
        .filter(|(watched, _)| *watched)
        .map(|(_, kind)| kind.to_string())
        .collect()
}

fn forum_scope_from_ids(ids: Vec<i64>) -> ForumScope {
    if ids.contains(&-1) {
        return ForumScope::All;
    }
    ForumScope::Forums(ids)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_watched_events() {
        let events = parse_watched_events(&[
            "new_thread".to_string(),
            "delete_post".to_string(),
        ])
        .unwrap();
        assert!(events.new_threads);
        assert!(events.delete_posts);
        assert!(!events.new_posts);
    }

    #[test]
    fn test_parse_watched_events_rejects_unknown() {
        let err = parse_watched_events(&["thread_made".to_string()]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_forum_sentinel_round_trip() {
        let request = CreateWebhookRequest {
            url: "https://discord.com/api/webhooks/1/tok".to_string(),
            name: None,
            use_embeds: true,
            embed_color: None,
            embed_thumbnail_url: None,
            embed_footer_text: None,
            embed_footer_icon_url: None,
            message_template: None,
            message_template_append: false,
            allow_mentions: false,
            character_limit: 500,
            events: vec![],
            watch_forums: vec![-1],
            watch_usergroups: vec![],
            bot_user_id: 1,
        };
        let target = request.into_domain().unwrap();
        assert_eq!(target.watched_forums, ForumScope::All);
    }

    #[test]
    fn test_update_empty_string_clears_optionals() {
        let request = UpdateWebhookRequest {
            name: Some(String::new()),
            embed_color: Some("#00ff00".to_string()),
            ..Default::default()
        };
        let patch = request.into_patch().unwrap();
        assert_eq!(patch.display_name, Some(None));
        assert_eq!(patch.embed_color, Some(Some("#00ff00".to_string())));
        assert!(patch.endpoint_url.is_none());
    }
}
