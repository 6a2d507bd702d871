//! PostgreSQL implementation of WebhookRepository

use async_trait::async_trait;
use sqlx::PgPool;

use forumcord::domain::value_objects::{ForumScope, IdSet, WatchedEvents};
use forumcord::{DomainError, NewWebhookTarget, WebhookRepository, WebhookTarget};

/// PostgreSQL implementation of WebhookRepository
pub struct PgWebhookRepository {
    pool: PgPool,
}

impl PgWebhookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct WebhookRow {
    id: i64,
    endpoint_url: String,
    display_name: Option<String>,
    use_embeds: bool,
    embed_color: Option<String>,
    embed_thumbnail_url: Option<String>,
    embed_footer_text: Option<String>,
    embed_footer_icon_url: Option<String>,
    message_template: Option<String>,
    message_template_append: bool,
    allow_mentions: bool,
    character_limit: i32,
    watch_new_threads: bool,
    watch_new_posts: bool,
    watch_edit_threads: bool,
    watch_edit_posts: bool,
    watch_delete_threads: bool,
    watch_delete_posts: bool,
    watch_new_registrations: bool,
    watch_forums: String,
    watch_usergroups: String,
    bot_user_id: i64,
}

impl From<WebhookRow> for WebhookTarget {
    fn from(row: WebhookRow) -> Self {
        Self {
            id: row.id,
            endpoint_url: row.endpoint_url,
            display_name: row.display_name,
            use_embeds: row.use_embeds,
            embed_color: row.embed_color,
            embed_thumbnail_url: row.embed_thumbnail_url,
            embed_footer_text: row.embed_footer_text,
            embed_footer_icon_url: row.embed_footer_icon_url,
            message_template: row.message_template,
            message_template_append: row.message_template_append,
            allow_mentions: row.allow_mentions,
            character_limit: row.character_limit,
            watched_events: WatchedEvents {
                new_threads: row.watch_new_threads,
                new_posts: row.watch_new_posts,
                edit_threads: row.watch_edit_threads,
                edit_posts: row.watch_edit_posts,
                delete_threads: row.watch_delete_threads,
                delete_posts: row.watch_delete_posts,
                new_registrations: row.watch_new_registrations,
            },
            watched_forums: ForumScope::decode(&row.watch_forums),
            watched_usergroups: IdSet::decode(&row.watch_usergroups),
            bot_user_id: row.bot_user_id,
        }
    }
}

const SELECT_COLUMNS: &str = "id, endpoint_url, display_name, use_embeds, embed_color, \
     embed_thumbnail_url, embed_footer_text, embed_footer_icon_url, message_template, \
     message_template_append, allow_mentions, character_limit, watch_new_threads, \
     watch_new_posts, watch_edit_threads, watch_edit_posts, watch_delete_threads, \
     watch_delete_posts, watch_new_registrations, watch_forums, watch_usergroups, bot_user_id";

#[async_trait]
impl WebhookRepository for PgWebhookRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<WebhookTarget>, DomainError> {
        let query = format!("SELECT {} FROM webhooks WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query_as::<_, WebhookRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(WebhookTarget::from))
    }

    async fn find_all(&self, limit: i64) -> Result<Vec<WebhookTarget>, DomainError> {
        let query = format!(
            "SELECT {} FROM webhooks ORDER BY id DESC LIMIT $1",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, WebhookRow>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(WebhookTarget::from).collect())
    }

    async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<WebhookTarget>, DomainError> {
        let query = format!(
            "SELECT {} FROM webhooks ORDER BY id DESC LIMIT $1 OFFSET $2",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, WebhookRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(WebhookTarget::from).collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM webhooks")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(count.0)
    }

    async fn url_in_use(&self, url: &str, exclude_id: Option<i64>) -> Result<bool, DomainError> {
        let taken: (bool,) = match exclude_id {
            Some(id) => sqlx::query_as(
                "SELECT EXISTS(SELECT 1 FROM webhooks WHERE endpoint_url = $1 AND id <> $2)",
            )
            .bind(url)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?,
            None => sqlx::query_as("SELECT EXISTS(SELECT 1 FROM webhooks WHERE endpoint_url = $1)")
                .bind(url)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::Repository(e.to_string()))?,
        };

        Ok(taken.0)
    }

    async fn insert(&self, target: &NewWebhookTarget) -> Result<WebhookTarget, DomainError> {
        let query = format!(
            "INSERT INTO webhooks (endpoint_url, display_name, use_embeds, embed_color, \
             embed_thumbnail_url, embed_footer_text, embed_footer_icon_url, message_template, \
             message_template_append, allow_mentions, character_limit, watch_new_threads, \
             watch_new_posts, watch_edit_threads, watch_edit_posts, watch_delete_threads, \
             watch_delete_posts, watch_new_registrations, watch_forums, watch_usergroups, \
             bot_user_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18, $19, $20, $21) \
             RETURNING {}",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, WebhookRow>(&query)
            .bind(&target.endpoint_url)
            .bind(&target.display_name)
            .bind(target.use_embeds)
            .bind(&target.embed_color)
            .bind(&target.embed_thumbnail_url)
            .bind(&target.embed_footer_text)
            .bind(&target.embed_footer_icon_url)
            .bind(&target.message_template)
            .bind(target.message_template_append)
            .bind(target.allow_mentions)
            .bind(target.character_limit)
            .bind(target.watched_events.new_threads)
            .bind(target.watched_events.new_posts)
            .bind(target.watched_events.edit_threads)
            .bind(target.watched_events.edit_posts)
            .bind(target.watched_events.delete_threads)
            .bind(target.watched_events.delete_posts)
            .bind(target.watched_events.new_registrations)
            .bind(target.watched_forums.encode())
            .bind(target.watched_usergroups.encode())
            .bind(target.bot_user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(WebhookTarget::from(row))
    }

    async fn update(&self, target: &WebhookTarget) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE webhooks SET endpoint_url = $2, display_name = $3, use_embeds = $4, \
             embed_color = $5, embed_thumbnail_url = $6, embed_footer_text = $7, \
             embed_footer_icon_url = $8, message_template = $9, message_template_append = $10, \
             allow_mentions = $11, character_limit = $12, watch_new_threads = $13, \
             watch_new_posts = $14, watch_edit_threads = $15, watch_edit_posts = $16, \
             watch_delete_threads = $17, watch_delete_posts = $18, \
             watch_new_registrations = $19, watch_forums = $20, watch_usergroups = $21, \
             bot_user_id = $22 \
             WHERE id = $1",
        )
        .bind(target.id)
        .bind(&target.endpoint_url)
        .bind(&target.display_name)
        .bind(target.use_embeds)
        .bind(&target.embed_color)
        .bind(&target.embed_thumbnail_url)
        .bind(&target.embed_footer_text)
        .bind(&target.embed_footer_icon_url)
        .bind(&target.message_template)
        .bind(target.message_template_append)
        .bind(target.allow_mentions)
        .bind(target.character_limit)
        .bind(target.watched_events.new_threads)
        .bind(target.watched_events.new_posts)
        .bind(target.watched_events.edit_threads)
        .bind(target.watched_events.edit_posts)
        .bind(target.watched_events.delete_threads)
        .bind(target.watched_events.delete_posts)
        .bind(target.watched_events.new_registrations)
        .bind(target.watched_forums.encode())
        .bind(target.watched_usergroups.encode())
        .bind(target.bot_user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, ids: &[i64]) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM webhooks WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
