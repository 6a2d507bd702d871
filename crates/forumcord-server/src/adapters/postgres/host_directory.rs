//! PostgreSQL implementation of HostDirectory
//!
//! Read-only queries against the host forum's own tables (`users`,
//! `forums`, `threads`, `posts`, `usergroups`, `user_titles`,
//! `user_profile_fields`). The relay never writes to these.

use async_trait::async_trait;
use sqlx::PgPool;

use forumcord::ports::{ForumInfo, PostInfo, ProfileField, ThreadInfo, TitleRank, UserProfile};
use forumcord::{DomainError, HostDirectory, IdSet};

/// PostgreSQL implementation of HostDirectory
pub struct PgHostDirectory {
    pool: PgPool,
    /// The board-wide warning ceiling, used for the warning percentage
    warning_max: i32,
}

impl PgHostDirectory {
    pub fn new(pool: PgPool, warning_max: i32) -> Self {
        Self { pool, warning_max }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    avatar_url: String,
    usergroup: i64,
    display_group: i64,
    post_count: i64,
    thread_count: i64,
    email: String,
    hide_email: bool,
    group_title: Option<String>,
    display_group_title: Option<String>,
    custom_title: String,
    signature: String,
    reputation: i64,
    warning_points: i32,
}

#[derive(sqlx::FromRow)]
struct MembershipRow {
    usergroup: i64,
    display_group: i64,
    additional_groups: String,
}

#[derive(sqlx::FromRow)]
struct ProfileFieldRow {
    field_name: String,
    field_value: String,
    visible: bool,
}

#[async_trait]
impl HostDirectory for PgHostDirectory {
    async fn get_user(&self, user_id: i64) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT u.id, u.username, u.avatar_url, u.usergroup, u.display_group, \
             u.post_count, u.thread_count, u.email, u.hide_email, u.custom_title, \
             u.signature, u.reputation, u.warning_points, \
             (SELECT g.title FROM usergroups g WHERE g.id = u.usergroup) AS group_title, \
             (SELECT g.title FROM usergroups g WHERE g.id = u.display_group) \
                 AS display_group_title \
             FROM users u WHERE u.id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let field_rows = sqlx::query_as::<_, ProfileFieldRow>(
            "SELECT field_name, field_value, visible FROM user_profile_fields \
             WHERE user_id = $1 ORDER BY field_name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        // Multi-value fields arrive as one row per value; fold them together
        let mut custom_fields: Vec<ProfileField> = Vec::new();
        for field_row in field_rows {
            match custom_fields.last_mut() {
                Some(last) if last.name == field_row.field_name => {
                    last.values.push(field_row.field_value);
                }
                _ => custom_fields.push(ProfileField {
                    name: field_row.field_name,
                    values: vec![field_row.field_value],
                    visible: field_row.visible,
                }),
            }
        }

        Ok(Some(UserProfile {
            user_id: row.id,
            username: row.username,
            avatar_url: row.avatar_url,
            usergroup: row.usergroup,
            display_group: row.display_group,
            post_count: row.post_count,
            thread_count: row.thread_count,
            email: row.email,
            hide_email: row.hide_email,
            group_title: row.group_title.unwrap_or_default(),
            display_group_title: row.display_group_title.unwrap_or_default(),
            custom_title: row.custom_title,
            signature: row.signature,
            reputation: row.reputation,
            warning_points: row.warning_points,
            warning_max: self.warning_max,
            custom_fields,
        }))
    }

    async fn get_forum(&self, forum_id: i64) -> Result<Option<ForumInfo>, DomainError> {
        let row: Option<(i64, String, bool)> =
            sqlx::query_as("SELECT id, name, allow_html FROM forums WHERE id = $1")
                .bind(forum_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(|(forum_id, name, allow_html)| ForumInfo {
            forum_id,
            name,
            allow_html,
        }))
    }

    async fn get_thread(&self, thread_id: i64) -> Result<Option<ThreadInfo>, DomainError> {
        let row: Option<(i64, i64, String, i64)> = sqlx::query_as(
            "SELECT id, forum_id, subject, first_post_id FROM threads WHERE id = $1",
        )
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(
            row.map(|(thread_id, forum_id, subject, first_post_id)| ThreadInfo {
                thread_id,
                forum_id,
                subject,
                first_post_id,
            }),
        )
    }

    async fn get_post(&self, post_id: i64) -> Result<Option<PostInfo>, DomainError> {
        let row: Option<(i64, i64, i64, i64, String, String)> = sqlx::query_as(
            "SELECT id, thread_id, forum_id, author_id, subject, message \
             FROM posts WHERE id = $1",
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(row.map(
            |(post_id, thread_id, forum_id, author_id, subject, message)| PostInfo {
                post_id,
                thread_id,
                forum_id,
                author_id,
                subject,
                message,
            },
        ))
    }

    async fn is_member(&self, groups: &IdSet, user_id: i64) -> Result<bool, DomainError> {
        let row = sqlx::query_as::<_, MembershipRow>(
            "SELECT usergroup, display_group, additional_groups FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        let Some(row) = row else {
            return Ok(false);
        };

        if groups.contains(row.usergroup) || groups.contains(row.display_group) {
            return Ok(true);
        }
        let additional = IdSet::decode(&row.additional_groups);
        Ok(additional.0.iter().any(|id| groups.contains(*id)))
    }

    async fn title_ladder(&self) -> Result<Vec<TitleRank>, DomainError> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT min_posts, title FROM user_titles ORDER BY min_posts DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(min_posts, title)| TitleRank { min_posts, title })
            .collect())
    }
}
