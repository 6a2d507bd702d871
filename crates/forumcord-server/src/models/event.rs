//! Event ingest and third-party send DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{AdHocMessage, DispatchSummary};

fn default_use_embeds() -> bool {
    true
}

fn default_character_limit() -> i32 {
    2000
}

/// Outcome counters for one dispatched event
#[derive(Debug, Serialize, ToSchema)]
pub struct DispatchResponse {
    pub delivered: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl From<DispatchSummary> for DispatchResponse {
    fn from(summary: DispatchSummary) -> Self {
        Self {
            delivered: summary.delivered,
            skipped: summary.skipped,
            failed: summary.failed,
        }
    }
}

/// One-off message on behalf of an external integration
#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    /// Discord incoming-webhook URL
    pub url: String,
    /// Sender name shown in Discord
    pub username: String,
    #[serde(default)]
    pub avatar_url: String,
    /// Raw forum-markup body
    pub content: String,
    #[serde(default = "default_use_embeds")]
    pub use_embeds: bool,
    #[serde(default)]
    pub allow_mentions: bool,
    #[serde(default = "default_character_limit")]
    pub character_limit: i32,
    #[serde(default)]
    pub embed_title: String,
    #[serde(default)]
    pub embed_url: String,
    pub embed_color: Option<String>,
    pub embed_thumbnail_url: Option<String>,
    pub embed_footer_text: Option<String>,
    pub embed_footer_icon_url: Option<String>,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    pub author_icon_url: Option<String>,
    pub image_url: Option<String>,
}

impl SendMessageRequest {
    pub fn into_domain(self) -> AdHocMessage {
        AdHocMessage {
            webhook_url: self.url,
            username: self.username,
            avatar_url: self.avatar_url,
            content: self.content,
            use_embeds: self.use_embeds,
            allow_mentions: self.allow_mentions,
            character_limit: self.character_limit,
            embed_title: self.embed_title,
            embed_url: self.embed_url,
            embed_color: self.embed_color,
            embed_thumbnail_url: self.embed_thumbnail_url,
            embed_footer_text: self.embed_footer_text,
            embed_footer_icon_url: self.embed_footer_icon_url,
            author_name: self.author_name,
            author_url: self.author_url,
            author_icon_url: self.author_icon_url,
            image_url: self.image_url,
        }
    }
}
