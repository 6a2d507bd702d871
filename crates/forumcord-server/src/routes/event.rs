//! Event Ingest Routes
//!
//! The host forum's hook bridge posts lifecycle events here; external
//! integrations get a separate one-off send endpoint.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::debug;

use forumcord::ForumEvent;

use crate::models::{DispatchResponse, SendMessageRequest};
use crate::routes::error_response;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/forumcord/events", post(ingest_event))
        .route("/forumcord/messages", post(send_message))
}

/// Relay one forum lifecycle event to every matching webhook target.
///
/// The body is a tagged `ForumEvent`, e.g.
/// `{"type":"new_post","thread_id":1,"post_id":2,"forum_id":3,
///   "author_id":4,"subject":"Re: hi","message":"[b]text[/b]"}`.
#[utoipa::path(
    post,
    path = "/forumcord/events",
    responses(
        (status = 200, description = "Event dispatched", body = DispatchResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Event"
)]
pub async fn ingest_event(
    State(state): State<AppState>,
    Json(event): Json<ForumEvent>,
) -> Result<Json<DispatchResponse>, (StatusCode, String)> {
    if !state.config.relay_enabled {
        debug!("Relay disabled, event dropped");
        return Ok(Json(DispatchResponse {
            delivered: 0,
            skipped: 0,
            failed: 0,
        }));
    }

    let summary = state
        .dispatcher
        .dispatch(&event)
        .await
        .map_err(error_response)?;
    Ok(Json(DispatchResponse::from(summary)))
}

/// Send a one-off message to an arbitrary Discord webhook
#[utoipa::path(
    post,
    path = "/forumcord/messages",
    request_body = SendMessageRequest,
    responses(
        (status = 204, description = "Message delivered"),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Third-party sends disabled"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Event"
)]
pub async fn send_message(
    State(state): State<AppState>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    if !state.config.third_party_enabled {
        return Err((
            StatusCode::FORBIDDEN,
            "Third-party sends are disabled".to_string(),
        ));
    }

    let message = payload.into_domain();
    state
        .dispatcher
        .send_adhoc(&message)
        .await
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}
