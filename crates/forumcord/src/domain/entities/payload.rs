//! DiscordPayload - the outbound webhook wire shape
//!
//! JSON schema of Discord's "execute webhook" endpoint. Optional parts are
//! skipped entirely rather than sent as nulls.

use serde::{Deserialize, Serialize};

/// Top-level webhook payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DiscordPayload {
    pub username: String,
    pub avatar_url: String,
    pub tts: bool,
    /// Plain text body, or the pingable mentions list in embed mode
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<DiscordEmbed>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
}

/// One rich-embed card
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DiscordEmbed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    pub title: String,
    pub url: String,
    pub description: String,
    pub color: u32,
    /// ISO-8601 UTC with a literal `Z` suffix
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedMedia>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmbedAuthor {
    pub name: String,
    pub url: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmbedMedia {
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: String,
}

/// Which mention categories Discord may actually ping
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllowedMentions {
    pub parse: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_parts_are_skipped() {
        let payload = DiscordPayload {
            username: "bot".to_string(),
            content: "hello".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("embeds").is_none());
        assert!(json.get("allowed_mentions").is_none());
        assert_eq!(json["tts"], false);
    }
}
