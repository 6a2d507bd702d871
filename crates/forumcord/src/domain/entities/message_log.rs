//! MessageLogEntry - links a local post/thread to its remote Discord message
//!
//! Created on successful creation deliveries, read before edits and
//! deletes, removed when the local content goes away. A post keeps the
//! same remote message id across any number of edits (PATCH reuses it),
//! so there is exactly one live entry per post id per webhook source;
//! targets find their own entry through the webhook id in their URL.

use serde::{Deserialize, Serialize};

/// One delivered message, keyed locally by post id (and thread id)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageLogEntry {
    pub discord_message_id: String,
    pub discord_channel_id: String,
    pub discord_webhook_id: String,
    /// Local thread id, 0 when not applicable
    pub thread_id: i64,
    /// Local post id, 0 when not applicable
    pub post_id: i64,
}

/// The identifier triple Discord returns from a `?wait=true` create
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RemoteMessageRef {
    pub id: String,
    pub channel_id: String,
    pub webhook_id: String,
}

impl MessageLogEntry {
    pub fn from_remote(remote: RemoteMessageRef, thread_id: i64, post_id: i64) -> Self {
        Self {
            discord_message_id: remote.id,
            discord_channel_id: remote.channel_id,
            discord_webhook_id: remote.webhook_id,
            thread_id,
            post_id,
        }
    }
}
