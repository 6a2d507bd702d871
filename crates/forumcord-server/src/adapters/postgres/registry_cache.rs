//! PostgreSQL implementation of RegistryCache
//!
//! The snapshot is stored as a single JSONB value in the `relay_cache`
//! key-value table. Replacement is a single upsert, so readers observe
//! either the old snapshot or the new one.

use async_trait::async_trait;
use sqlx::PgPool;

use forumcord::ports::REGISTRY_CACHE_KEY;
use forumcord::{CachedTarget, DomainError, RegistryCache};

/// PostgreSQL implementation of RegistryCache
pub struct PgRegistryCache {
    pool: PgPool,
}

impl PgRegistryCache {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistryCache for PgRegistryCache {
    async fn read(&self) -> Result<Option<Vec<CachedTarget>>, DomainError> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT cache_value FROM relay_cache WHERE cache_key = $1")
                .bind(REGISTRY_CACHE_KEY)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::Repository(e.to_string()))?;

        match row {
            Some((value,)) => {
                let snapshot = serde_json::from_value(value)
                    .map_err(|e| DomainError::Repository(e.to_string()))?;
                Ok(Some(snapshot))
            }
            None => Ok(None),
        }
    }

    async fn replace(&self, snapshot: &[CachedTarget]) -> Result<(), DomainError> {
        let value = serde_json::to_value(snapshot)
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        sqlx::query(
            "INSERT INTO relay_cache (cache_key, cache_value, updated_at) \
             VALUES ($1, $2, NOW()) \
             ON CONFLICT (cache_key) DO UPDATE \
             SET cache_value = EXCLUDED.cache_value, updated_at = NOW()",
        )
        .bind(REGISTRY_CACHE_KEY)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM relay_cache WHERE cache_key = $1")
            .bind(REGISTRY_CACHE_KEY)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(())
    }
}
