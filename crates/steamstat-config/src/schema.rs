//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use steamstat_common::LoggingConfig;

/// Main configuration structure for SteamStat Bot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Steam API configuration.
    pub steam: SteamConfig,
    /// Upstream result cache configuration.
    pub cache: CacheConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Prefix for message-based commands.
    pub command_prefix: String,
}

/// Steam Web API and store API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteamConfig {
    /// Steam Web API key.
    pub api_key: String,
    /// Base URL of the Steam Web API.
    pub api_base_url: String,
    /// Base URL of the Steam store API.
    pub store_base_url: String,
    /// Optional store country code used for price lookups.
    pub country_code: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_seconds: u64,
    /// Maximum number of price lookups in flight for one command.
    pub price_concurrency: usize,
    /// Currency label used when no title in a library has a price.
    pub default_currency_label: String,
}

impl SteamConfig {
    /// Request timeout as a [`Duration`].
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Upstream result cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Time-to-live for cached entries, in seconds.
    pub ttl_seconds: u64,
    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Time-to-live as a [`Duration`].
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}
