//! Infrastructure Adapters
//!
//! Concrete implementations of the domain ports: PostgreSQL persistence,
//! the host forum directory, and the reqwest Discord transport.

pub mod delivery;
pub mod postgres;

pub use delivery::HttpDeliveryClient;
pub use postgres::{
    PgHostDirectory, PgMessageLogRepository, PgRegistryCache, PgWebhookRepository,
};
