//! MessageLog Repository Port
//!
//! Abstract interface for the local-content-to-remote-message mapping.
//! Entries are written only after a confirmed successful delivery.

use async_trait::async_trait;

use crate::domain::entities::MessageLogEntry;
use crate::domain::errors::DomainError;

/// Repository interface for MessageLogEntry records
#[async_trait]
pub trait MessageLogRepository: Send + Sync {
    /// Record a delivered creation
    async fn insert(&self, entry: &MessageLogEntry) -> Result<(), DomainError>;

    /// Live entries for a post, one per webhook source that delivered it
    async fn find_by_post(&self, post_id: i64) -> Result<Vec<MessageLogEntry>, DomainError>;

    /// Every entry belonging to a thread
    async fn find_by_thread(&self, thread_id: i64) -> Result<Vec<MessageLogEntry>, DomainError>;

    /// Remove the entry for one post
    async fn delete_by_post(&self, post_id: i64) -> Result<u64, DomainError>;

    /// Remove every entry for a thread (whole-thread delete)
    async fn delete_by_thread(&self, thread_id: i64) -> Result<u64, DomainError>;
}
