//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    CreateWebhookRequest,
    DeleteWebhooksRequest,
    DeleteWebhooksResponse,
    // Event models
    DispatchResponse,
    RebuildResponse,
    SendMessageRequest,
    UpdateWebhookRequest,
    WebhookListResponse,
    // Webhook models
    WebhookResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Webhook endpoints
        super::webhook::list_webhooks,
        super::webhook::create_webhook,
        super::webhook::get_webhook,
        super::webhook::update_webhook,
        super::webhook::delete_webhook,
        super::webhook::delete_webhooks,
        super::webhook::rebuild_registry,
        // Event endpoints
        super::event::ingest_event,
        super::event::send_message,
    ),
    info(
        title = "Forumcord API",
        version = "0.3.0",
        description = "Forum-to-Discord notification relay.\n\nMirrors forum lifecycle events (threads, posts, registrations) to configured Discord incoming webhooks, and keeps the mirrored messages in step with later edits and deletions.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Webhook", description = "Webhook target registry management"),
        (name = "Event", description = "Forum event ingest and one-off sends"),
    ),
    components(
        schemas(
            // Webhook
            WebhookResponse,
            WebhookListResponse,
            CreateWebhookRequest,
            UpdateWebhookRequest,
            DeleteWebhooksRequest,
            DeleteWebhooksResponse,
            RebuildResponse,
            // Event
            DispatchResponse,
            SendMessageRequest,
        )
    )
)]
pub struct ApiDoc;
