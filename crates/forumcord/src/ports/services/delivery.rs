//! Delivery Client Port
//!
//! Thin synchronous-per-call JSON request interface to the Discord webhook
//! API. No retries: delivery is best-effort and fire-and-forget; a failed
//! round trip surfaces as `DomainError::ExternalService` and the caller
//! decides whether to log and move on.

use async_trait::async_trait;

use crate::domain::entities::DiscordPayload;
use crate::domain::errors::DomainError;

/// HTTP verb subset the Discord webhook API uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMethod {
    Post,
    Patch,
    Delete,
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryMethod::Post => write!(f, "POST"),
            DeliveryMethod::Patch => write!(f, "PATCH"),
            DeliveryMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// Outbound request interface
///
/// Implementations send `Content-Type: application/json` and return the
/// raw response body; the caller parses what it needs from it.
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    async fn request(
        &self,
        method: DeliveryMethod,
        url: &str,
        body: Option<&DiscordPayload>,
    ) -> Result<String, DomainError>;
}

/// Transport limits for delivery implementations
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Redirect-follow cap
    pub max_redirects: usize,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            max_redirects: 10,
            user_agent: "Forumcord-Relay/0.3".to_string(),
        }
    }
}
