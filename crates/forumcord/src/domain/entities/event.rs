//! ForumEvent - typed forum lifecycle events
//!
//! The dispatcher consumes these instead of the host's loosely-typed hook
//! arguments; every handler is an explicit match arm, nothing is wired up
//! by reflection.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::EventKind;

/// Content payload shared by thread/post creation and edit events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostContent {
    pub thread_id: i64,
    pub post_id: i64,
    pub forum_id: i64,
    pub author_id: i64,
    /// Author display name as the host rendered it; empty for guests
    /// without a chosen name
    #[serde(default)]
    pub author_name: String,
    pub subject: String,
    /// Raw forum-markup body
    pub message: String,
}

/// Payload of a completed registration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistrationInfo {
    pub user_id: i64,
    pub username: String,
}

/// A forum lifecycle event, as posted by the host's hook bridge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ForumEvent {
    NewThread(PostContent),
    NewPost(PostContent),
    /// Edit of a thread's first post (`first_post`) or any reply
    Edit {
        #[serde(flatten)]
        content: PostContent,
        first_post: bool,
        /// User performing the edit, not necessarily the author
        actor_id: i64,
    },
    /// Batch delete of posts by a moderator or the author
    DeletePosts {
        actor_id: i64,
        post_ids: Vec<i64>,
    },
    /// Batch delete of whole threads
    DeleteThreads {
        actor_id: i64,
        thread_ids: Vec<i64>,
    },
    NewRegistration(RegistrationInfo),
}

impl ForumEvent {
    /// The watch-flag kind this event is filtered against
    pub fn kind(&self) -> EventKind {
        match self {
            ForumEvent::NewThread(_) => EventKind::NewThread,
            ForumEvent::NewPost(_) => EventKind::NewPost,
            ForumEvent::Edit {
                first_post: true, ..
            } => EventKind::EditThread,
            ForumEvent::Edit {
                first_post: false, ..
            } => EventKind::EditPost,
            ForumEvent::DeletePosts { .. } => EventKind::DeletePost,
            ForumEvent::DeleteThreads { .. } => EventKind::DeleteThread,
            ForumEvent::NewRegistration(_) => EventKind::NewRegistration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_mapping() {
        let content = PostContent {
            thread_id: 1,
            post_id: 2,
            forum_id: 3,
            author_id: 4,
            author_name: "alice".to_string(),
            subject: "hi".to_string(),
            message: "body".to_string(),
        };

        assert_eq!(
            ForumEvent::NewThread(content.clone()).kind(),
            EventKind::NewThread
        );
        assert_eq!(
            ForumEvent::Edit {
                content,
                first_post: true,
                actor_id: 4
            }
            .kind(),
            EventKind::EditThread
        );
        assert_eq!(
            ForumEvent::DeletePosts {
                actor_id: 1,
                post_ids: vec![2]
            }
            .kind(),
            EventKind::DeletePost
        );
    }

    #[test]
    fn test_event_json_tagging() {
        let event: ForumEvent = serde_json::from_str(
            r#"{
                "type": "new_post",
                "thread_id": 10, "post_id": 11, "forum_id": 42,
                "author_id": 5, "author_name": "bob",
                "subject": "Re: hello", "message": "[b]hi[/b]"
            }"#,
        )
        .unwrap();
        assert_eq!(event.kind(), EventKind::NewPost);
    }
}
