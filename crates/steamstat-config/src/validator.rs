//! Runtime validation of a loaded configuration.

use crate::schema::Config;
use steamstat_common::SteamStatError;
use url::Url;

impl Config {
    /// Validates the configuration, reporting the first offending field.
    pub fn validate(&self) -> Result<(), SteamStatError> {
        if self.discord.token.trim().is_empty() {
            return Err(SteamStatError::validation_field(
                "Discord token cannot be empty",
                "discord.token",
            ));
        }

        if self.discord.command_prefix.is_empty() {
            return Err(SteamStatError::validation_field(
                "Command prefix cannot be empty",
                "discord.command_prefix",
            ));
        }

        if self.steam.api_key.trim().is_empty() {
            return Err(SteamStatError::validation_field(
                "Steam API key cannot be empty",
                "steam.api_key",
            ));
        }

        validate_base_url(&self.steam.api_base_url, "steam.api_base_url")?;
        validate_base_url(&self.steam.store_base_url, "steam.store_base_url")?;

        if self.steam.request_timeout_seconds == 0 {
            return Err(SteamStatError::validation_field(
                "Request timeout must be greater than 0",
                "steam.request_timeout_seconds",
            ));
        }

        if self.steam.price_concurrency == 0 {
            return Err(SteamStatError::validation_field(
                "Price concurrency must be at least 1",
                "steam.price_concurrency",
            ));
        }

        if self.cache.ttl_seconds == 0 {
            return Err(SteamStatError::validation_field(
                "Cache TTL must be greater than 0",
                "cache.ttl_seconds",
            ));
        }

        if self.cache.max_capacity == 0 {
            return Err(SteamStatError::validation_field(
                "Cache capacity must be greater than 0",
                "cache.max_capacity",
            ));
        }

        Ok(())
    }
}

fn validate_base_url(raw: &str, field: &str) -> Result<(), SteamStatError> {
    let parsed = Url::parse(raw).map_err(|e| {
        SteamStatError::validation_field(format!("Invalid URL '{raw}': {e}"), field)
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(SteamStatError::validation_field(
            format!("Unsupported URL scheme '{other}'"),
            field,
        )),
    }
}
