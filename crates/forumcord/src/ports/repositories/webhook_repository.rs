//! WebhookTarget Repository Port
//!
//! Abstract interface for webhook target persistence operations.

use async_trait::async_trait;

use crate::domain::entities::{NewWebhookTarget, WebhookTarget};
use crate::domain::errors::DomainError;

/// Repository interface for WebhookTarget entities
#[async_trait]
pub trait WebhookRepository: Send + Sync {
    /// Find a target by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<WebhookTarget>, DomainError>;

    /// First `limit` targets, newest first (registry cache source)
    async fn find_all(&self, limit: i64) -> Result<Vec<WebhookTarget>, DomainError>;

    /// One page of targets for the admin listing
    async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<WebhookTarget>, DomainError>;

    /// Total configured targets
    async fn count(&self) -> Result<i64, DomainError>;

    /// Whether the endpoint URL is already taken by another target
    async fn url_in_use(&self, url: &str, exclude_id: Option<i64>) -> Result<bool, DomainError>;

    /// Insert a new target and return it with its assigned id
    async fn insert(&self, target: &NewWebhookTarget) -> Result<WebhookTarget, DomainError>;

    /// Rewrite an existing target; `false` when the id does not exist
    async fn update(&self, target: &WebhookTarget) -> Result<bool, DomainError>;

    /// Delete targets by id, returning how many rows went away
    async fn delete(&self, ids: &[i64]) -> Result<u64, DomainError>;
}
