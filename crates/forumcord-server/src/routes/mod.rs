//! Forumcord API Routes
//!
//! - /forumcord/webhooks - webhook target management
//! - /forumcord/events - forum event ingest
//! - /forumcord/messages - third-party one-off sends

pub mod event;
pub mod swagger;
pub mod webhook;

use axum::http::StatusCode;

use forumcord::DomainError;

/// Map a domain error onto an HTTP status plus plain-text detail
pub fn error_response(error: DomainError) -> (StatusCode, String) {
    let status = match &error {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Repository(_) | DomainError::ExternalService(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, error.to_string())
}
