//! Host Directory Port
//!
//! Read-only view of the host forum: user/forum/thread/post lookups, the
//! usergroup membership predicate, and the bits placeholder expansion
//! needs. Absent records come back as `None`, never as an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::IdSet;

/// A host user with everything placeholder expansion can reference
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user_id: i64,
    pub username: String,
    /// May be relative to the board root; callers normalize it
    pub avatar_url: String,
    pub usergroup: i64,
    pub display_group: i64,
    pub post_count: i64,
    pub thread_count: i64,
    pub email: String,
    /// Privacy flag: when set, the email token never expands
    pub hide_email: bool,
    pub group_title: String,
    pub display_group_title: String,
    /// Admin-assigned custom title, empty when unset
    pub custom_title: String,
    /// Raw forum-markup signature
    pub signature: String,
    pub reputation: i64,
    pub warning_points: i32,
    /// Warning ceiling the percentage is computed against
    pub warning_max: i32,
    pub custom_fields: Vec<ProfileField>,
}

/// One custom profile field attached to a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileField {
    pub name: String,
    /// Multi-select fields carry several values
    pub values: Vec<String>,
    /// Per-field visibility permission
    pub visible: bool,
}

/// One rung of the post-count-derived title ladder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TitleRank {
    pub min_posts: i64,
    pub title: String,
}

/// Forum attributes the dispatcher cares about
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForumInfo {
    pub forum_id: i64,
    pub name: String,
    /// Raw HTML allowed in posts; gates HTML image detection
    pub allow_html: bool,
}

/// Thread attributes the dispatcher cares about
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThreadInfo {
    pub thread_id: i64,
    pub forum_id: i64,
    pub subject: String,
    /// The opening post; whole-thread deletes target its remote message
    pub first_post_id: i64,
}

/// Post attributes the dispatcher cares about
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostInfo {
    pub post_id: i64,
    pub thread_id: i64,
    pub forum_id: i64,
    pub author_id: i64,
    pub subject: String,
    pub message: String,
}

/// Host forum lookup interface
#[async_trait]
pub trait HostDirectory: Send + Sync {
    async fn get_user(&self, user_id: i64) -> Result<Option<UserProfile>, DomainError>;

    async fn get_forum(&self, forum_id: i64) -> Result<Option<ForumInfo>, DomainError>;

    async fn get_thread(&self, thread_id: i64) -> Result<Option<ThreadInfo>, DomainError>;

    async fn get_post(&self, post_id: i64) -> Result<Option<PostInfo>, DomainError>;

    /// Whether the user belongs to any of the given usergroups
    async fn is_member(&self, groups: &IdSet, user_id: i64) -> Result<bool, DomainError>;

    /// Post-count title thresholds, used when a user has no explicit title
    async fn title_ladder(&self) -> Result<Vec<TitleRank>, DomainError>;
}
