//! Webhook Target Routes
//!
//! HTTP handlers for the admin-facing webhook registry.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::{
    CreateWebhookRequest, DeleteWebhooksRequest, DeleteWebhooksResponse, RebuildResponse,
    UpdateWebhookRequest, WebhookListResponse, WebhookResponse,
};
use crate::routes::error_response;
use crate::AppState;

const DEFAULT_PER_PAGE: i64 = 20;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number, starting at 1
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/forumcord/webhooks", get(list_webhooks).post(create_webhook))
        .route(
            "/forumcord/webhooks/:id",
            get(get_webhook).put(update_webhook).delete(delete_webhook),
        )
        .route("/forumcord/webhooks/delete", post(delete_webhooks))
        .route("/forumcord/webhooks/rebuild", post(rebuild_registry))
}

/// List webhook targets, one page at a time
#[utoipa::path(
    get,
    path = "/forumcord/webhooks",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of webhook targets", body = WebhookListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Webhook"
)]
pub async fn list_webhooks(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<WebhookListResponse>, (StatusCode, String)> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, 100);

    let (targets, total) = state
        .registry
        .page(page, per_page)
        .await
        .map_err(error_response)?;

    Ok(Json(WebhookListResponse {
        webhooks: targets
            .into_iter()
            .map(WebhookResponse::from_domain)
            .collect(),
        total,
        page,
        per_page,
    }))
}

/// Register a new webhook target
#[utoipa::path(
    post,
    path = "/forumcord/webhooks",
    request_body = CreateWebhookRequest,
    responses(
        (status = 200, description = "Webhook target created", body = WebhookResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "URL already configured"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Webhook"
)]
pub async fn create_webhook(
    State(state): State<AppState>,
    Json(payload): Json<CreateWebhookRequest>,
) -> Result<Json<WebhookResponse>, (StatusCode, String)> {
    let new_target = payload.into_domain().map_err(error_response)?;
    let saved = state
        .registry
        .create(new_target)
        .await
        .map_err(error_response)?;

    Ok(Json(WebhookResponse::from_domain(saved)))
}

/// Get a webhook target by id
#[utoipa::path(
    get,
    path = "/forumcord/webhooks/{id}",
    params(
        ("id" = i64, Path, description = "Webhook target id")
    ),
    responses(
        (status = 200, description = "Webhook target found", body = WebhookResponse),
        (status = 404, description = "Webhook target not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Webhook"
)]
pub async fn get_webhook(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<WebhookResponse>, (StatusCode, String)> {
    let target = state.registry.get(id).await.map_err(error_response)?;
    Ok(Json(WebhookResponse::from_domain(target)))
}

/// Update a webhook target; only supplied fields change
#[utoipa::path(
    put,
    path = "/forumcord/webhooks/{id}",
    params(
        ("id" = i64, Path, description = "Webhook target id")
    ),
    request_body = UpdateWebhookRequest,
    responses(
        (status = 200, description = "Webhook target updated", body = WebhookResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Webhook target not found"),
        (status = 409, description = "URL already configured"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Webhook"
)]
pub async fn update_webhook(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateWebhookRequest>,
) -> Result<Json<WebhookResponse>, (StatusCode, String)> {
    let patch = payload.into_patch().map_err(error_response)?;
    let updated = state
        .registry
        .update(id, patch)
        .await
        .map_err(error_response)?;

    Ok(Json(WebhookResponse::from_domain(updated)))
}

/// Delete a single webhook target
#[utoipa::path(
    delete,
    path = "/forumcord/webhooks/{id}",
    params(
        ("id" = i64, Path, description = "Webhook target id")
    ),
    responses(
        (status = 200, description = "Webhook target deleted", body = DeleteWebhooksResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Webhook"
)]
pub async fn delete_webhook(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteWebhooksResponse>, (StatusCode, String)> {
    let removed = state.registry.delete(&[id]).await.map_err(error_response)?;
    Ok(Json(DeleteWebhooksResponse { removed }))
}

/// Delete several webhook targets at once
#[utoipa::path(
    post,
    path = "/forumcord/webhooks/delete",
    request_body = DeleteWebhooksRequest,
    responses(
        (status = 200, description = "Webhook targets deleted", body = DeleteWebhooksResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Webhook"
)]
pub async fn delete_webhooks(
    State(state): State<AppState>,
    Json(payload): Json<DeleteWebhooksRequest>,
) -> Result<Json<DeleteWebhooksResponse>, (StatusCode, String)> {
    let removed = state
        .registry
        .delete(&payload.ids)
        .await
        .map_err(error_response)?;
    Ok(Json(DeleteWebhooksResponse { removed }))
}

/// Force a registry snapshot rebuild
#[utoipa::path(
    post,
    path = "/forumcord/webhooks/rebuild",
    responses(
        (status = 200, description = "Snapshot rebuilt", body = RebuildResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Webhook"
)]
pub async fn rebuild_registry(
    State(state): State<AppState>,
) -> Result<Json<RebuildResponse>, (StatusCode, String)> {
    let targets = state.registry.rebuild().await.map_err(error_response)?;
    Ok(Json(RebuildResponse { targets }))
}
