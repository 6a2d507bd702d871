//! PostgreSQL implementation of MessageLogRepository

use async_trait::async_trait;
use sqlx::PgPool;

use forumcord::{DomainError, MessageLogEntry, MessageLogRepository};

/// PostgreSQL implementation of MessageLogRepository
pub struct PgMessageLogRepository {
    pool: PgPool,
}

impl PgMessageLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct MessageLogRow {
    discord_message_id: String,
    discord_channel_id: String,
    discord_webhook_id: String,
    thread_id: i64,
    post_id: i64,
}

impl From<MessageLogRow> for MessageLogEntry {
    fn from(row: MessageLogRow) -> Self {
        Self {
            discord_message_id: row.discord_message_id,
            discord_channel_id: row.discord_channel_id,
            discord_webhook_id: row.discord_webhook_id,
            thread_id: row.thread_id,
            post_id: row.post_id,
        }
    }
}

#[async_trait]
impl MessageLogRepository for PgMessageLogRepository {
    async fn insert(&self, entry: &MessageLogEntry) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO webhooks_logs (discord_message_id, discord_channel_id, \
             discord_webhook_id, thread_id, post_id) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&entry.discord_message_id)
        .bind(&entry.discord_channel_id)
        .bind(&entry.discord_webhook_id)
        .bind(entry.thread_id)
        .bind(entry.post_id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn find_by_post(&self, post_id: i64) -> Result<Vec<MessageLogEntry>, DomainError> {
        let rows = sqlx::query_as::<_, MessageLogRow>(
            "SELECT discord_message_id, discord_channel_id, discord_webhook_id, thread_id, \
             post_id FROM webhooks_logs WHERE post_id = $1",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(MessageLogEntry::from).collect())
    }

    async fn find_by_thread(&self, thread_id: i64) -> Result<Vec<MessageLogEntry>, DomainError> {
        let rows = sqlx::query_as::<_, MessageLogRow>(
            "SELECT discord_message_id, discord_channel_id, discord_webhook_id, thread_id, \
             post_id FROM webhooks_logs WHERE thread_id = $1",
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows.into_iter().map(MessageLogEntry::from).collect())
    }

    async fn delete_by_post(&self, post_id: i64) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM webhooks_logs WHERE post_id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn delete_by_thread(&self, thread_id: i64) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM webhooks_logs WHERE thread_id = $1")
            .bind(thread_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
