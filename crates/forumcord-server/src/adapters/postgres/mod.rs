//! PostgreSQL Adapters

mod host_directory;
mod message_log_repository;
mod registry_cache;
mod webhook_repository;

pub use host_directory::PgHostDirectory;
pub use message_log_repository::PgMessageLogRepository;
pub use registry_cache::PgRegistryCache;
pub use webhook_repository::PgWebhookRepository;
