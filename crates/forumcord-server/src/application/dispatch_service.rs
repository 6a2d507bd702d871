//! Event Dispatch Service (Use Case)
//!
//! Fans a forum lifecycle event out to every cached webhook target whose
//! watch predicate matches: event flag, forum scope, then usergroup gate.
//! Creations POST with `?wait=true` and record the returned message ids;
//! edits PATCH the recorded message, deletes remove it. Targets fail
//! independently; one refused connection never blocks the rest.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use forumcord::domain::services::{markup, mentions, placeholder, text};
use forumcord::domain::{hex_to_int, is_webhook_url, webhook_id_from_url, MAX_CHARACTER_LIMIT};
use forumcord::ports::UserProfile;
use forumcord::{
    CachedTarget, DeliveryClient, DeliveryMethod, DiscordEmbed, DiscordPayload, DomainError,
    EmbedAuthor, EmbedFooter, EmbedMedia, EventKind, ForumEvent, HostDirectory, IdSet,
    MessageLogEntry, MessageLogRepository, PostContent, RegistrationInfo, RegistryCache,
    RemoteMessageRef, WebhookTarget,
};

/// Dispatcher settings
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Board root URL, used for links and to absolutize relative avatars
    pub board_url: String,
}

/// Per-event outcome counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub delivered: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// A one-off message on behalf of an external integration. Bypasses the
/// registry entirely; the caller supplies the endpoint and presentation.
#[derive(Debug, Clone)]
pub struct AdHocMessage {
    pub webhook_url: String,
    pub username: String,
    pub avatar_url: String,
    /// Raw forum-markup body
    pub content: String,
    pub use_embeds: bool,
    pub allow_mentions: bool,
    pub character_limit: i32,
    pub embed_title: String,
    pub embed_url: String,
    pub embed_color: Option<String>,
    pub embed_thumbnail_url: Option<String>,
    pub embed_footer_text: Option<String>,
    pub embed_footer_icon_url: Option<String>,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    pub author_icon_url: Option<String>,
    pub image_url: Option<String>,
}

/// Application service for event fan-out
pub struct DispatchService<C, L, D, H>
where
    C: RegistryCache,
    L: MessageLogRepository,
    D: DeliveryClient,
    H: HostDirectory,
{
    cache: Arc<C>,
    message_log: Arc<L>,
    delivery: Arc<D>,
    host: Arc<H>,
    config: DispatchConfig,
}

impl<C, L, D, H> DispatchService<C, L, D, H>
where
    C: RegistryCache,
    L: MessageLogRepository,
    D: DeliveryClient,
    H: HostDirectory,
{
    pub fn new(
        cache: Arc<C>,
        message_log: Arc<L>,
        delivery: Arc<D>,
        host: Arc<H>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            cache,
            message_log,
            delivery,
            host,
            config,
        }
    }

    /// Fan one event out to every matching target
    pub async fn dispatch(&self, event: &ForumEvent) -> Result<DispatchSummary, DomainError> {
        let kind = event.kind();
        match event {
            ForumEvent::NewThread(content) | ForumEvent::NewPost(content) => {
                self.handle_content(kind, content).await
            }
            ForumEvent::Edit {
                content, actor_id, ..
            } => self.handle_edit(kind, content, *actor_id).await,
            ForumEvent::DeletePosts { actor_id, post_ids } => {
                self.handle_delete_posts(*actor_id, post_ids).await
            }
            ForumEvent::DeleteThreads {
                actor_id,
                thread_ids,
            } => self.handle_delete_threads(*actor_id, thread_ids).await,
            ForumEvent::NewRegistration(info) => self.handle_registration(info).await,
        }
    }

    /// Send a caller-shaped message to an arbitrary webhook endpoint
    pub async fn send_adhoc(&self, msg: &AdHocMessage) -> Result<(), DomainError> {
        if !is_webhook_url(&msg.webhook_url) {
            return Err(DomainError::Validation(
                "Webhook URL must look like https://discord.com/api/webhooks/{id}/{token}"
                    .to_string(),
            ));
        }

        let limit = msg.character_limit.clamp(1, MAX_CHARACTER_LIMIT) as usize;
        let body = text::truncate(&markup::translate(&msg.content, msg.use_embeds), limit);

        let mut payload = DiscordPayload {
            username: msg.username.clone(),
            avatar_url: self.absolute_url(&msg.avatar_url),
            ..Default::default()
        };

        if msg.use_embeds {
            let author = msg.author_name.as_ref().map(|name| EmbedAuthor {
                name: name.clone(),
                url: msg.author_url.clone().unwrap_or_default(),
                icon_url: msg.author_icon_url.clone().unwrap_or_default(),
            });
            payload.embeds = Some(vec![DiscordEmbed {
                author,
                title: msg.embed_title.clone(),
                url: msg.embed_url.clone(),
                description: body,
                color: hex_to_int(msg.embed_color.as_deref().unwrap_or("")),
                timestamp: now_iso(),
                thumbnail: optional_media(msg.embed_thumbnail_url.as_deref()),
                footer: optional_footer(
                    msg.embed_footer_text.as_deref(),
                    msg.embed_footer_icon_url.as_deref(),
                ),
                image: optional_media(msg.image_url.as_deref()),
            }]);
            if msg.allow_mentions {
                payload.content = mentions::extract(&msg.content);
                payload.allowed_mentions = Some(mentions::allowed_mentions());
            }
        } else {
            payload.content = body;
            if msg.allow_mentions {
                payload.allowed_mentions = Some(mentions::allowed_mentions());
            }
        }

        self.delivery
            .request(DeliveryMethod::Post, &msg.webhook_url, Some(&payload))
            .await?;
        Ok(())
    }

    async fn handle_content(
        &self,
        kind: EventKind,
        content: &PostContent,
    ) -> Result<DispatchSummary, DomainError> {
        let mut summary = DispatchSummary::default();
        let targets = self.cache.read().await?.unwrap_or_default();
        if targets.is_empty() {
            return Ok(summary);
        }

        let author = self.host.get_user(content.author_id).await?;
        let allow_html = self
            .host
            .get_forum(content.forum_id)
            .await?
            .map(|f| f.allow_html)
            .unwrap_or(false);
        let ladder = self.host.title_ladder().await?;
        let tokens = placeholder::build_tokens(author.as_ref(), &ladder);

        for cached in &targets {
            let target = &cached.target;
            if !target.watched_events.watches(kind)
                || !target.watched_forums.contains(content.forum_id)
                || !self
                    .member_gate(&target.watched_usergroups, content.author_id)
                    .await?
            {
                summary.skipped += 1;
                continue;
            }

            let payload =
                self.content_payload(cached, kind, content, author.as_ref(), allow_html, &tokens);
            let url = format!("{}?wait=true", target.endpoint_url);

            match self
                .delivery
                .request(DeliveryMethod::Post, &url, Some(&payload))
                .await
            {
                Ok(body) => {
                    summary.delivered += 1;
                    self.record_delivery(target, &body, content).await;
                }
                Err(e) => {
                    summary.failed += 1;
                    warn!(target_id = target.id, error = %e, "Webhook delivery failed");
                }
            }
        }

        Ok(summary)
    }

    /// Parse the `?wait=true` response and remember the remote message
    async fn record_delivery(&self, target: &WebhookTarget, body: &str, content: &PostContent) {
        match serde_json::from_str::<RemoteMessageRef>(body) {
            Ok(remote) => {
                let entry =
                    MessageLogEntry::from_remote(remote, content.thread_id, content.post_id);
                if let Err(e) = self.message_log.insert(&entry).await {
                    warn!(target_id = target.id, error = %e, "Failed to record delivered message");
                }
            }
            Err(e) => {
                warn!(target_id = target.id, error = %e, "Unparseable Discord create response");
            }
        }
    }

    async fn handle_edit(
        &self,
        kind: EventKind,
        content: &PostContent,
        actor_id: i64,
    ) -> Result<DispatchSummary, DomainError> {
        let mut summary = DispatchSummary::default();
        let targets = self.cache.read().await?.unwrap_or_default();
        if targets.is_empty() {
            return Ok(summary);
        }

        // Edits of pruned threads have nothing left to update
        if self.host.get_thread(content.thread_id).await?.is_none() {
            return Ok(summary);
        }

        let entries = self.message_log.find_by_post(content.post_id).await?;
        let author = self.host.get_user(content.author_id).await?;
        let allow_html = self
            .host
            .get_forum(content.forum_id)
            .await?
            .map(|f| f.allow_html)
            .unwrap_or(false);
        let ladder = self.host.title_ladder().await?;
        let tokens = placeholder::build_tokens(author.as_ref(), &ladder);

        for cached in &targets {
            let target = &cached.target;
            // Plain text messages are never rewritten after the fact.
            // The usergroup gate judges whoever performed the edit.
            if !target.use_embeds
                || !target.watched_events.watches(kind)
                || !target.watched_forums.contains(content.forum_id)
                || !self
                    .member_gate(&target.watched_usergroups, actor_id)
                    .await?
            {
                summary.skipped += 1;
                continue;
            }

            let Some(entry) = find_entry_for(target, &entries) else {
                debug!(
                    target_id = target.id,
                    post_id = content.post_id,
                    "No delivered message to edit, skipping"
                );
                summary.skipped += 1;
                continue;
            };

            let payload =
                self.content_payload(cached, kind, content, author.as_ref(), allow_html, &tokens);
            let url = format!(
                "{}/messages/{}",
                target.endpoint_url, entry.discord_message_id
            );

            match self
                .delivery
                .request(DeliveryMethod::Patch, &url, Some(&payload))
                .await
            {
                Ok(_) => summary.delivered += 1,
                Err(e) => {
                    summary.failed += 1;
                    warn!(target_id = target.id, error = %e, "Webhook edit failed");
                }
            }
        }

        Ok(summary)
    }

    async fn handle_delete_posts(
        &self,
        actor_id: i64,
        post_ids: &[i64],
    ) -> Result<DispatchSummary, DomainError> {
        let mut summary = DispatchSummary::default();
        let targets = self.cache.read().await?.unwrap_or_default();
        if targets.is_empty() {
            return Ok(summary);
        }

        for &post_id in post_ids {
            let Some(post) = self.host.get_post(post_id).await? else {
                debug!(post_id, "Deleted post unknown to the host, skipping");
                continue;
            };
            let entries = self.message_log.find_by_post(post_id).await?;
            if entries.is_empty() {
                continue;
            }

            for cached in &targets {
                let target = &cached.target;
                if !target.watched_events.watches(EventKind::DeletePost)
                    || !target.watched_forums.contains(post.forum_id)
                    || !self
                        .member_gate(&target.watched_usergroups, actor_id)
                        .await?
                {
                    summary.skipped += 1;
                    continue;
                }
                let Some(entry) = find_entry_for(target, &entries) else {
                    summary.skipped += 1;
                    continue;
                };
                self.delete_remote(target, entry, &mut summary).await;
            }

            // Local post is gone regardless of remote outcomes
            self.message_log.delete_by_post(post_id).await?;
        }

        Ok(summary)
    }

    async fn handle_delete_threads(
        &self,
        actor_id: i64,
        thread_ids: &[i64],
    ) -> Result<DispatchSummary, DomainError> {
        let mut summary = DispatchSummary::default();
        let targets = self.cache.read().await?.unwrap_or_default();
        if targets.is_empty() {
            return Ok(summary);
        }

        for &thread_id in thread_ids {
            let Some(thread) = self.host.get_thread(thread_id).await? else {
                debug!(thread_id, "Deleted thread unknown to the host, skipping");
                continue;
            };
            // The thread is represented remotely by its opening post
            let entries = self.message_log.find_by_post(thread.first_post_id).await?;

            for cached in &targets {
                let target = &cached.target;
                if !target.watched_events.watches(EventKind::DeleteThread)
                    || !target.watched_forums.contains(thread.forum_id)
                    || !self
                        .member_gate(&target.watched_usergroups, actor_id)
                        .await?
                {
                    summary.skipped += 1;
                    continue;
                }
                let Some(entry) = find_entry_for(target, &entries) else {
                    summary.skipped += 1;
                    continue;
                };
                self.delete_remote(target, entry, &mut summary).await;
            }

            self.message_log.delete_by_thread(thread_id).await?;
        }

        Ok(summary)
    }

    async fn delete_remote(
        &self,
        target: &WebhookTarget,
        entry: &MessageLogEntry,
        summary: &mut DispatchSummary,
    ) {
        let url = format!(
            "{}/messages/{}",
            target.endpoint_url, entry.discord_message_id
        );
        match self
            .delivery
            .request(DeliveryMethod::Delete, &url, None)
            .await
        {
            Ok(_) => summary.delivered += 1,
            Err(e) => {
                summary.failed += 1;
                warn!(target_id = target.id, error = %e, "Webhook delete failed");
            }
        }
    }

    async fn handle_registration(
        &self,
        info: &RegistrationInfo,
    ) -> Result<DispatchSummary, DomainError> {
        let mut summary = DispatchSummary::default();
        let targets = self.cache.read().await?.unwrap_or_default();
        if targets.is_empty() {
            return Ok(summary);
        }

        let user = self.host.get_user(info.user_id).await?;
        let ladder = self.host.title_ladder().await?;
        let tokens = placeholder::build_tokens(user.as_ref(), &ladder);
        let profile_url = self.profile_url(info.user_id);

        for cached in &targets {
            let target = &cached.target;
            // Registrations belong to no forum and predate group changes,
            // so only the event flag applies
            if !target.watched_events.watches(EventKind::NewRegistration) {
                summary.skipped += 1;
                continue;
            }

            let natural = format!("New registration: [{}]({})", info.username, profile_url);
            let body = self.resolve_body(target, &natural, &tokens);

            let mut payload = self.base_payload(cached);
            if target.use_embeds {
                payload.embeds = Some(vec![DiscordEmbed {
                    author: None,
                    title: format!("New registration: {}", info.username),
                    url: profile_url.clone(),
                    description: body,
                    color: hex_to_int(target.embed_color.as_deref().unwrap_or("")),
                    timestamp: now_iso(),
                    thumbnail: optional_media(target.embed_thumbnail_url.as_deref()),
                    footer: optional_footer(
                        target.embed_footer_text.as_deref(),
                        target.embed_footer_icon_url.as_deref(),
                    ),
                    image: None,
                }]);
            } else {
                payload.content = body;
            }

            // Fire and forget: registrations are never edited or deleted,
            // so nothing is logged
            match self
                .delivery
                .request(DeliveryMethod::Post, &target.endpoint_url, Some(&payload))
                .await
            {
                Ok(_) => summary.delivered += 1,
                Err(e) => {
                    summary.failed += 1;
                    warn!(target_id = target.id, error = %e, "Webhook delivery failed");
                }
            }
        }

        Ok(summary)
    }

    /// An empty usergroup set gates nobody out
    async fn member_gate(&self, groups: &IdSet, user_id: i64) -> Result<bool, DomainError> {
        if groups.is_empty() {
            return Ok(true);
        }
        self.host.is_member(groups, user_id).await
    }

    fn content_payload(
        &self,
        cached: &CachedTarget,
        kind: EventKind,
        content: &PostContent,
        author: Option<&UserProfile>,
        allow_html: bool,
        tokens: &BTreeMap<String, String>,
    ) -> DiscordPayload {
        let target = &cached.target;
        let author_name = author_display(&content.author_name, author);
        let author_profile_url = self.profile_url(content.author_id);

        let title = match kind {
            EventKind::NewPost | EventKind::EditPost if !content.subject.starts_with("Re:") => {
                format!("Re: {}", content.subject)
            }
            _ => content.subject.clone(),
        };
        let link = match kind {
            EventKind::NewThread | EventKind::EditThread => self.thread_url(content.thread_id),
            _ => self.post_url(content.thread_id, content.post_id),
        };

        let body = self.resolve_body(target, &content.message, tokens);
        let mut payload = self.base_payload(cached);

        if target.use_embeds {
            payload.embeds = Some(vec![DiscordEmbed {
                author: Some(EmbedAuthor {
                    name: author_name,
                    url: author_profile_url,
                    icon_url: self
                        .absolute_url(author.map(|u| u.avatar_url.as_str()).unwrap_or("")),
                }),
                title,
                url: link,
                description: body,
                color: hex_to_int(target.embed_color.as_deref().unwrap_or("")),
                timestamp: now_iso(),
                thumbnail: optional_media(target.embed_thumbnail_url.as_deref()),
                footer: optional_footer(
                    target.embed_footer_text.as_deref(),
                    target.embed_footer_icon_url.as_deref(),
                ),
                image: optional_media(Some(
                    markup::extract_image_url(&content.message, allow_html).as_str(),
                )),
            }]);
            if target.allow_mentions {
                payload.content = mentions::extract(&content.message);
                payload.allowed_mentions = Some(mentions::allowed_mentions());
            }
        } else {
            let heading = match kind {
                EventKind::NewThread => "New thread",
                EventKind::NewPost => "New reply",
                EventKind::EditThread => "Updated thread",
                _ => "Updated reply",
            };
            payload.content = format!(
                "**{}: [{}]({})** by [{}]({})\n\n{}",
                heading,
                title,
                link,
                author_display(&content.author_name, author),
                self.profile_url(content.author_id),
                body
            );
            if target.allow_mentions {
                payload.allowed_mentions = Some(mentions::allowed_mentions());
            }
        }

        payload
    }

    /// Template override, placeholder expansion, markup translation, cap
    fn resolve_body(
        &self,
        target: &WebhookTarget,
        natural: &str,
        tokens: &BTreeMap<String, String>,
    ) -> String {
        let source = match (&target.message_template, target.message_template_append) {
            (Some(template), true) if !template.is_empty() => {
                format!("{}\n{}", natural, template)
            }
            (Some(template), false) if !template.is_empty() => template.clone(),
            _ => natural.to_string(),
        };
        let expanded = placeholder::expand(&source, tokens);
        let translated = markup::translate(&expanded, target.use_embeds);
        text::truncate(&translated, target.character_limit.max(1) as usize)
    }

    fn base_payload(&self, cached: &CachedTarget) -> DiscordPayload {
        DiscordPayload {
            username: cached.bot.username.clone(),
            avatar_url: self.absolute_url(&cached.bot.avatar_url),
            ..Default::default()
        }
    }

    fn thread_url(&self, thread_id: i64) -> String {
        format!("{}/threads/{}", self.board_root(), thread_id)
    }

    fn post_url(&self, thread_id: i64, post_id: i64) -> String {
        format!("{}/threads/{}#pid{}", self.board_root(), thread_id, post_id)
    }

    fn profile_url(&self, user_id: i64) -> String {
        format!("{}/users/{}", self.board_root(), user_id)
    }

    fn board_root(&self) -> &str {
        self.config.board_url.trim_end_matches('/')
    }

    /// Board-relative paths (avatars mostly) become absolute URLs
    fn absolute_url(&self, raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() || raw.starts_with("http://") || raw.starts_with("https://") {
            return raw.to_string();
        }
        format!(
            "{}/{}",
            self.board_root(),
            raw.trim_start_matches("./").trim_start_matches('/')
        )
    }
}

/// The entry this target created, recognized by the webhook id in its URL
fn find_entry_for<'a>(
    target: &WebhookTarget,
    entries: &'a [MessageLogEntry],
) -> Option<&'a MessageLogEntry> {
    let webhook_id = webhook_id_from_url(&target.endpoint_url)?;
    entries
        .iter()
        .find(|entry| entry.discord_webhook_id == webhook_id)
}

fn author_display(content_name: &str, author: Option<&UserProfile>) -> String {
    if !content_name.is_empty() {
        return content_name.to_string();
    }
    author
        .map(|user| user.username.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Guest".to_string())
}

fn now_iso() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn optional_media(url: Option<&str>) -> Option<EmbedMedia> {
    match url {
        Some(url) if !url.is_empty() => Some(EmbedMedia {
            url: url.to_string(),
        }),
        _ => None,
    }
}

fn optional_footer(text: Option<&str>, icon_url: Option<&str>) -> Option<EmbedFooter> {
    match text {
        Some(text) if !text.is_empty() => Some(EmbedFooter {
            text: text.to_string(),
            icon_url: icon_url.unwrap_or_default().to_string(),
        }),
        _ => None,
    }
}
