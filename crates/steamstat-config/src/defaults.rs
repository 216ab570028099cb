//! Default values for every configuration section.

use crate::schema::{CacheConfig, DiscordConfig, SteamConfig};

/// Default Steam Web API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.steampowered.com";
/// Default Steam store API base URL.
pub const DEFAULT_STORE_BASE_URL: &str = "https://store.steampowered.com";
/// Default cache time-to-live in seconds.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 600;
/// Default cache capacity.
pub const DEFAULT_CACHE_CAPACITY: u64 = 100;

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            command_prefix: "!".to_string(),
        }
    }
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            store_base_url: DEFAULT_STORE_BASE_URL.to_string(),
            country_code: None,
            request_timeout_seconds: 30,
            price_concurrency: 8,
            default_currency_label: "RUB".to_string(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            max_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}
