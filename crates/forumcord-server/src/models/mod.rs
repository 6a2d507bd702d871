//! API DTOs
//!
//! Request/response types for the HTTP surface, kept separate from the
//! domain entities so wire compatibility never leaks inward.

mod event;
mod webhook;

pub use event::{DispatchResponse, SendMessageRequest};
pub use webhook::{
    CreateWebhookRequest, DeleteWebhooksRequest, DeleteWebhooksResponse, RebuildResponse,
    UpdateWebhookRequest, WebhookListResponse, WebhookResponse,
};
