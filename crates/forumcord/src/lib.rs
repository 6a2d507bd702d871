//! Forumcord Domain Library
//!
//! Core domain types and interfaces for the Forumcord notification relay,
//! which mirrors forum lifecycle events (threads, posts, registrations)
//! to configured Discord incoming webhooks.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (WebhookTarget, MessageLogEntry, ForumEvent, DiscordPayload)
//!   - `value_objects/`: Immutable value types (EventKind, ForumScope, hex colors)
//!   - `services/`: Pure functions (markup translation, mention extraction, placeholder expansion)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: Host and transport interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use forumcord::domain::{WebhookTarget, ForumEvent};
//! use forumcord::ports::{WebhookRepository, DeliveryClient};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    AllowedMentions, BotIdentity, CachedTarget, DiscordEmbed, DiscordPayload, DomainError,
    EmbedAuthor, EmbedFooter, EmbedMedia, EventKind, ForumEvent, ForumScope, IdSet,
    MessageLogEntry, NewWebhookTarget, PostContent, RegistrationInfo, RemoteMessageRef,
    WatchedEvents, WebhookTarget, WebhookTargetPatch,
};
pub use ports::{
    DeliveryClient, DeliveryMethod, ForumInfo, HostDirectory, MessageLogRepository, PostInfo,
    ProfileField, RegistryCache, ThreadInfo, TitleRank, UserProfile, WebhookRepository,
};
