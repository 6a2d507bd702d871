//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - WebhookTarget: one configured Discord endpoint plus its delivery rules
//! - MessageLogEntry: local content id -> remote message identifiers
//! - ForumEvent: typed forum lifecycle events
//! - DiscordPayload: the outbound wire shape

mod event;
mod message_log;
mod payload;
mod webhook_target;

pub use event::*;
pub use message_log::*;
pub use payload::*;
pub use webhook_target::*;
