//! Environment configuration

use anyhow::Context;

/// Server settings resolved from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    /// Board root URL, used for links and to absolutize relative avatars
    pub board_url: String,
    /// Master switch: when off, ingested events are acknowledged and dropped
    pub relay_enabled: bool,
    /// Whether external integrations may use the one-off send endpoint
    pub third_party_enabled: bool,
    /// Board-wide warning point ceiling
    pub warning_max: i32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:8080"),
            board_url: env_or("BOARD_URL", "http://localhost"),
            relay_enabled: env_flag("RELAY_ENABLED", true),
            third_party_enabled: env_flag("THIRD_PARTY_ENABLED", false),
            warning_max: std::env::var("BOARD_WARNING_MAX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(value) => matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}
