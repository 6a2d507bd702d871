//! Registry Cache Port
//!
//! The decoded target snapshot lives in the host's key-value cache under a
//! fixed key. Writers always replace the whole snapshot, so readers see
//! either the old or the new list, never a partial one.

use async_trait::async_trait;

use crate::domain::entities::CachedTarget;
use crate::domain::errors::DomainError;

/// Fixed cache key for the registry snapshot
pub const REGISTRY_CACHE_KEY: &str = "forumcord_cached_hooks";

/// Snapshot cache interface
#[async_trait]
pub trait RegistryCache: Send + Sync {
    /// The current snapshot, `None` when the cache has never been built
    async fn read(&self) -> Result<Option<Vec<CachedTarget>>, DomainError>;

    /// Overwrite the snapshot wholesale
    async fn replace(&self, snapshot: &[CachedTarget]) -> Result<(), DomainError>;

    /// Drop the snapshot (uninstall)
    async fn clear(&self) -> Result<(), DomainError>;
}
