//! Webhook Registry Service (Use Case)
//!
//! Orchestrates target CRUD with validation, and keeps the decoded
//! snapshot cache in step: every mutation ends with a wholesale rebuild,
//! so the dispatcher never reads a stale or partial registry.

use std::sync::Arc;

use tracing::info;

use forumcord::domain::{is_valid_hex_color, is_webhook_url, MAX_CHARACTER_LIMIT, MAX_TARGETS};
use forumcord::{
    BotIdentity, CachedTarget, DomainError, HostDirectory, NewWebhookTarget, RegistryCache,
    WebhookRepository, WebhookTarget, WebhookTargetPatch,
};

/// Application service for webhook target management
pub struct RegistryService<R: WebhookRepository, C: RegistryCache, H: HostDirectory> {
    repo: Arc<R>,
    cache: Arc<C>,
    host: Arc<H>,
}

impl<R: WebhookRepository, C: RegistryCache, H: HostDirectory> RegistryService<R, C, H> {
    pub fn new(repo: Arc<R>, cache: Arc<C>, host: Arc<H>) -> Self {
        Self { repo, cache, host }
    }

    /// The current decoded snapshot; empty when nothing is cached yet
    pub async fn snapshot(&self) -> Result<Vec<CachedTarget>, DomainError> {
        Ok(self.cache.read().await?.unwrap_or_default())
    }

    /// Rebuild the snapshot from storage, resolving each target's bot
    /// identity. Returns how many targets the new snapshot holds.
    pub async fn rebuild(&self) -> Result<usize, DomainError> {
        let targets = self.repo.find_all(MAX_TARGETS).await?;
        let mut snapshot = Vec::with_capacity(targets.len());

        for target in targets {
            let bot = match self.host.get_user(target.bot_user_id).await? {
                Some(user) => BotIdentity {
                    user_id: user.user_id,
                    username: user.username,
                    avatar_url: user.avatar_url,
                },
                None => BotIdentity::not_available(),
            };
            snapshot.push(CachedTarget { target, bot });
        }

        self.cache.replace(&snapshot).await?;
        info!(targets = snapshot.len(), "Registry snapshot rebuilt");
        Ok(snapshot.len())
    }

    /// Get a target by id
    pub async fn get(&self, id: i64) -> Result<WebhookTarget, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("WebhookTarget", id))
    }

    /// One page of targets plus the total count, `page` starting at 1
    pub async fn page(
        &self,
        page: i64,
        per_page: i64,
    ) -> Result<(Vec<WebhookTarget>, i64), DomainError> {
        let page = page.max(1);
        let offset = (page - 1) * per_page;
        let targets = self.repo.find_page(offset, per_page).await?;
        let total = self.repo.count().await?;
        Ok((targets, total))
    }

    /// Create a target, then rebuild the snapshot
    pub async fn create(&self, new: NewWebhookTarget) -> Result<WebhookTarget, DomainError> {
        self.validate(
            &new.endpoint_url,
            new.embed_color.as_deref(),
            new.character_limit,
            new.bot_user_id,
            None,
        )
        .await?;

        if self.repo.count().await? >= MAX_TARGETS {
            return Err(DomainError::Validation(format!(
                "At most {} webhooks may be configured",
                MAX_TARGETS
            )));
        }

        let saved = self.repo.insert(&new).await?;
        self.rebuild().await?;
        info!(id = saved.id, "Webhook target created");
        Ok(saved)
    }

    /// Apply a partial update to a target, then rebuild the snapshot
    pub async fn update(
        &self,
        id: i64,
        patch: WebhookTargetPatch,
    ) -> Result<WebhookTarget, DomainError> {
        let mut target = self.get(id).await?;
        target.apply(patch);

        self.validate(
            &target.endpoint_url,
            target.embed_color.as_deref(),
            target.character_limit,
            target.bot_user_id,
            Some(id),
        )
        .await?;

        if !self.repo.update(&target).await? {
            return Err(DomainError::not_found("WebhookTarget", id));
        }

        self.rebuild().await?;
        info!(id, "Webhook target updated");
        Ok(target)
    }

    /// Delete targets by id, then rebuild the snapshot
    pub async fn delete(&self, ids: &[i64]) -> Result<u64, DomainError> {
        let removed = self.repo.delete(ids).await?;
        self.rebuild().await?;
        info!(removed, "Webhook targets deleted");
        Ok(removed)
    }

    async fn validate(
        &self,
        url: &str,
        color: Option<&str>,
        character_limit: i32,
        bot_user_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<(), DomainError> {
        if !is_webhook_url(url) {
            return Err(DomainError::Validation(
                "Webhook URL must look like https://discord.com/api/webhooks/{id}/{token}"
                    .to_string(),
            ));
        }
        if self.repo.url_in_use(url, exclude_id).await? {
            return Err(DomainError::Conflict(
                "This webhook URL is already configured".to_string(),
            ));
        }
        if let Some(color) = color {
            if !color.is_empty() && !is_valid_hex_color(color) {
                return Err(DomainError::Validation(format!(
                    "Invalid embed color: {}",
                    color
                )));
            }
        }
        if !(1..=MAX_CHARACTER_LIMIT).contains(&character_limit) {
            return Err(DomainError::Validation(format!(
                "Character limit must be between 1 and {}",
                MAX_CHARACTER_LIMIT
            )));
        }
        if self.host.get_user(bot_user_id).await?.is_none() {
            return Err(DomainError::Validation(format!(
                "Bot user {} does not exist on the board",
                bot_user_id
            )));
        }
        Ok(())
    }
}
