//! In-memory port implementations for application service tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use forumcord::domain::webhook_id_from_url;
use forumcord::ports::{ForumInfo, PostInfo, ThreadInfo, TitleRank, UserProfile};
use forumcord::{
    CachedTarget, DeliveryClient, DeliveryMethod, DiscordPayload, DomainError, HostDirectory,
    IdSet, MessageLogEntry, MessageLogRepository, NewWebhookTarget, RegistryCache,
    WebhookRepository, WebhookTarget,
};

#[derive(Default)]
pub struct FakeWebhookRepo {
    targets: Mutex<Vec<WebhookTarget>>,
    next_id: AtomicI64,
}

#[async_trait]
impl WebhookRepository for FakeWebhookRepo {
    async fn find_by_id(&self, id: i64) -> Result<Option<WebhookTarget>, DomainError> {
        Ok(self
            .targets
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn find_all(&self, limit: i64) -> Result<Vec<WebhookTarget>, DomainError> {
        let mut targets = self.targets.lock().unwrap().clone();
        targets.sort_by(|a, b| b.id.cmp(&a.id));
        targets.truncate(limit as usize);
        Ok(targets)
    }

    async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<WebhookTarget>, DomainError> {
        let mut targets = self.targets.lock().unwrap().clone();
        targets.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(targets
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        Ok(self.targets.lock().unwrap().len() as i64)
    }

    async fn url_in_use(&self, url: &str, exclude_id: Option<i64>) -> Result<bool, DomainError> {
        Ok(self
            .targets
            .lock()
            .unwrap()
            .iter()
            .any(|t| t.endpoint_url == url && Some(t.id) != exclude_id))
    }

    async fn insert(&self, target: &NewWebhookTarget) -> Result<WebhookTarget, DomainError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let saved = WebhookTarget {
            id,
            endpoint_url: target.endpoint_url.clone(),
            display_name: target.display_name.clone(),
            use_embeds: target.use_embeds,
            embed_color: target.embed_color.clone(),
            embed_thumbnail_url: target.embed_thumbnail_url.clone(),
            embed_footer_text: target.embed_footer_text.clone(),
            embed_footer_icon_url: target.embed_footer_icon_url.clone(),
            message_template: target.message_template.clone(),
            message_template_append: target.message_template_append,
            allow_mentions: target.allow_mentions,
            character_limit: target.character_limit,
            watched_events: target.watched_events,
            watched_forums: target.watched_forums.clone(),
            watched_usergroups: target.watched_usergroups.clone(),
            bot_user_id: target.bot_user_id,
        };
        self.targets.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    async fn update(&self, target: &WebhookTarget) -> Result<bool, DomainError> {
        let mut targets = self.targets.lock().unwrap();
        match targets.iter_mut().find(|t| t.id == target.id) {
            Some(existing) => {
                *existing = target.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, ids: &[i64]) -> Result<u64, DomainError> {
        let mut targets = self.targets.lock().unwrap();
        let before = targets.len();
        targets.retain(|t| !ids.contains(&t.id));
        Ok((before - targets.len()) as u64)
    }
}

#[derive(Default)]
pub struct FakeCache {
    snapshot: Mutex<Option<Vec<CachedTarget>>>,
}

#[async_trait]
impl RegistryCache for FakeCache {
    async fn read(&self) -> Result<Option<Vec<CachedTarget>>, DomainError> {
        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn replace(&self, snapshot: &[CachedTarget]) -> Result<(), DomainError> {
        *self.snapshot.lock().unwrap() = Some(snapshot.to_vec());
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        *self.snapshot.lock().unwrap() = None;
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeHost {
    users: Mutex<HashMap<i64, UserProfile>>,
    forums: Mutex<HashMap<i64, ForumInfo>>,
    threads: Mutex<HashMap<i64, ThreadInfo>>,
    posts: Mutex<HashMap<i64, PostInfo>>,
    ladder: Mutex<Vec<TitleRank>>,
}

impl FakeHost {
    pub fn add_user(&self, user: UserProfile) {
        self.users.lock().unwrap().insert(user.user_id, user);
    }

    pub fn remove_user(&self, user_id: i64) {
        self.users.lock().unwrap().remove(&user_id);
    }

    pub fn add_forum(&self, forum: ForumInfo) {
        self.forums.lock().unwrap().insert(forum.forum_id, forum);
    }

    pub fn add_thread(&self, thread: ThreadInfo) {
        self.threads.lock().unwrap().insert(thread.thread_id, thread);
    }

    pub fn add_post(&self, post: PostInfo) {
        self.posts.lock().unwrap().insert(post.post_id, post);
    }

    pub fn set_ladder(&self, ladder: Vec<TitleRank>) {
        *self.ladder.lock().unwrap() = ladder;
    }
}

#[async_trait]
impl HostDirectory for FakeHost {
    async fn get_user(&self, user_id: i64) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }

    async fn get_forum(&self, forum_id: i64) -> Result<Option<ForumInfo>, DomainError> {
        Ok(self.forums.lock().unwrap().get(&forum_id).cloned())
    }

    async fn get_thread(&self, thread_id: i64) -> Result<Option<ThreadInfo>, DomainError> {
        Ok(self.threads.lock().unwrap().get(&thread_id).cloned())
    }

    async fn get_post(&self, post_id: i64) -> Result<Option<PostInfo>, DomainError> {
        Ok(self.posts.lock().unwrap().get(&post_id).cloned())
    }

    async fn is_member(&self, groups: &IdSet, user_id: i64) -> Result<bool, DomainError> {
        let users = self.users.lock().unwrap();
        let Some(user) = users.get(&user_id) else {
            return Ok(false);
        };
        Ok(groups.contains(user.usergroup) || groups.contains(user.display_group))
    }

    async fn title_ladder(&self) -> Result<Vec<TitleRank>, DomainError> {
        Ok(self.ladder.lock().unwrap().clone())
    }
}

/// Recorded outbound request
pub type RecordedRequest = (DeliveryMethod, String, Option<DiscordPayload>);

/// Delivery double that records every request and answers with a
/// plausible Discord create response. The echoed `webhook_id` is parsed
/// from the request URL, like the real API would report it.
#[derive(Default)]
pub struct FakeDelivery {
    requests: Mutex<Vec<RecordedRequest>>,
    fail_substrings: Mutex<Vec<String>>,
    next_message_id: AtomicI64,
}

impl FakeDelivery {
    /// Make every request whose URL contains `fragment` fail
    pub fn fail_urls_containing(&self, fragment: &str) {
        self.fail_substrings
            .lock()
            .unwrap()
            .push(fragment.to_string());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeliveryClient for FakeDelivery {
    async fn request(
        &self,
        method: DeliveryMethod,
        url: &str,
        body: Option<&DiscordPayload>,
    ) -> Result<String, DomainError> {
        self.requests
            .lock()
            .unwrap()
            .push((method, url.to_string(), body.cloned()));

        let failing = self
            .fail_substrings
            .lock()
            .unwrap()
            .iter()
            .any(|fragment| url.contains(fragment));
        if failing {
            return Err(DomainError::ExternalService("connection refused".to_string()));
        }

        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1;
        let webhook_id = webhook_id_from_url(url).unwrap_or("0");
        Ok(format!(
            r#"{{"id":"m{}","channel_id":"c1","webhook_id":"{}"}}"#,
            message_id, webhook_id
        ))
    }
}

#[derive(Default)]
pub struct FakeMessageLog {
    entries: Mutex<Vec<MessageLogEntry>>,
}

impl FakeMessageLog {
    pub fn entries(&self) -> Vec<MessageLogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageLogRepository for FakeMessageLog {
    async fn insert(&self, entry: &MessageLogEntry) -> Result<(), DomainError> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn find_by_post(&self, post_id: i64) -> Result<Vec<MessageLogEntry>, DomainError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn find_by_thread(&self, thread_id: i64) -> Result<Vec<MessageLogEntry>, DomainError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.thread_id == thread_id)
            .cloned()
            .collect())
    }

    async fn delete_by_post(&self, post_id: i64) -> Result<u64, DomainError> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.post_id != post_id);
        Ok((before - entries.len()) as u64)
    }

    async fn delete_by_thread(&self, thread_id: i64) -> Result<u64, DomainError> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.thread_id != thread_id);
        Ok((before - entries.len()) as u64)
    }
}
