//! Configuration loading utilities

use crate::Config;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use steamstat_common::{Result as SteamStatResult, SteamStatError};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "STEAMSTAT_CONFIG_PATH";

/// Files searched for in the working directory when no path is given.
const DEFAULT_CONFIG_FILES: [&str; 3] = ["config.yaml", "config.yml", "config.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(SteamStatError),
}

impl From<ConfigError> for SteamStatError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError(inner) => inner,
            other => Self::config_with_source("Failed to load configuration", other),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML or TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let mut config = Self::parse_file(path.as_ref())?;
        Self::apply_env_overrides(&mut config)?;
        config.validate().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Load configuration from the environment and the first config file found
    pub fn load() -> SteamStatResult<Config> {
        Self::load_from(Self::locate().as_deref())
    }

    /// Load configuration from `path`, or from defaults and the environment
    /// when there is no file.
    pub fn load_from(path: Option<&Path>) -> SteamStatResult<Config> {
        if let Some(path) = path {
            return Ok(Self::load_config(path)?);
        }

        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// The configuration file [`ConfigLoader::load`] would read, if any.
    pub fn locate() -> Option<PathBuf> {
        Self::locate_from(|name| env::var(name).ok(), Path::new(""))
    }

    /// Finds the configuration file using an arbitrary variable lookup.
    ///
    /// A non-blank `STEAMSTAT_CONFIG_PATH` is returned even when the file is
    /// missing.
    pub fn locate_from<F>(lookup: F, dir: &Path) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(explicit) = lookup(CONFIG_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            return Some(PathBuf::from(explicit));
        }

        DEFAULT_CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Parse a configuration file without applying overrides or validation.
    ///
    /// Files ending in `.toml` are parsed as TOML, everything else as YAML.
    pub fn parse_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        debug!(toml = is_toml, "Parsing configuration file {}", path.display());
        if is_toml {
            Ok(toml::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    /// Apply process environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |name| env::var(name).ok())
    }

    /// Apply overrides using an arbitrary variable lookup.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Discord configuration overrides
        if let Some(token) = lookup("DISCORD_TOKEN") {
            config.discord.token = token;
        }
        if let Some(prefix) = lookup("DISCORD_COMMAND_PREFIX") {
            config.discord.command_prefix = prefix;
        }

        // Steam configuration overrides
        if let Some(api_key) = lookup("STEAM_API_KEY") {
            config.steam.api_key = api_key;
        }
        if let Some(url) = lookup("STEAM_API_BASE_URL") {
            config.steam.api_base_url = url;
        }
        if let Some(url) = lookup("STEAM_STORE_BASE_URL") {
            config.steam.store_base_url = url;
        }
        if let Some(cc) = lookup("STEAM_COUNTRY_CODE") {
            config.steam.country_code = Some(cc).filter(|c| !c.is_empty());
        }
        if let Some(timeout) = lookup("STEAM_REQUEST_TIMEOUT") {
            config.steam.request_timeout_seconds = parse_var("STEAM_REQUEST_TIMEOUT", &timeout)?;
        }
        if let Some(concurrency) = lookup("STEAM_PRICE_CONCURRENCY") {
            config.steam.price_concurrency = parse_var("STEAM_PRICE_CONCURRENCY", &concurrency)?;
        }

        // Cache configuration overrides
        if let Some(ttl) = lookup("CACHE_TTL_SECONDS") {
            config.cache.ttl_seconds = parse_var("CACHE_TTL_SECONDS", &ttl)?;
        }
        if let Some(capacity) = lookup("CACHE_MAX_CAPACITY") {
            config.cache.max_capacity = parse_var("CACHE_MAX_CAPACITY", &capacity)?;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim().parse().map_err(|e| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use steamstat_common::test_utils::config_fixtures;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_parse_full_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(config_fixtures::full_config_yaml().as_bytes())
            .unwrap();

        let config = ConfigLoader::parse_file(file.path()).unwrap();
        assert_eq!(config.discord.token, "test_token_full");
        assert_eq!(config.discord.command_prefix, "?");
        assert_eq!(config.steam.country_code.as_deref(), Some("ru"));
        assert_eq!(config.steam.price_concurrency, 4);
        assert_eq!(config.cache.ttl_seconds, 120);
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_parse_minimal_toml_fills_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(config_fixtures::minimal_config_toml().as_bytes())
            .unwrap();

        let config = ConfigLoader::parse_file(file.path()).unwrap();
        assert_eq!(config.steam.api_key, "toml_api_key");
        assert_eq!(config.cache.ttl_seconds, 30);
        assert_eq!(config.cache.max_capacity, 100);
        assert_eq!(config.steam.request_timeout_seconds, 30);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        let lookup = lookup_from(&[
            ("DISCORD_TOKEN", "env_token"),
            ("STEAM_API_KEY", "env_key"),
            ("STEAM_PRICE_CONCURRENCY", "16"),
            ("CACHE_TTL_SECONDS", " 60 "),
            ("STEAM_COUNTRY_CODE", ""),
        ]);

        ConfigLoader::apply_overrides_from(&mut config, lookup).unwrap();
        assert_eq!(config.discord.token, "env_token");
        assert_eq!(config.steam.api_key, "env_key");
        assert_eq!(config.steam.price_concurrency, 16);
        assert_eq!(config.cache.ttl_seconds, 60);
        assert!(config.steam.country_code.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_parse_error_names_variable() {
        let mut config = Config::default();
        let lookup = lookup_from(&[("CACHE_MAX_CAPACITY", "lots")]);

        let err = ConfigLoader::apply_overrides_from(&mut config, lookup).unwrap_err();
        match err {
            ConfigError::EnvParseError { var, .. } => assert_eq!(var, "CACHE_MAX_CAPACITY"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(b"steam: [unterminated").unwrap();

        let err = ConfigLoader::parse_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_error_converts_transparently() {
        let err = ConfigError::ValidationError(SteamStatError::validation_field(
            "Steam API key cannot be empty",
            "steam.api_key",
        ));
        let converted: SteamStatError = err.into();
        assert!(matches!(converted, SteamStatError::Validation { .. }));
    }

    #[test]
    fn test_locate_prefers_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.yaml"), "").unwrap();

        let lookup = lookup_from(&[(CONFIG_PATH_ENV, "/etc/steamstat/bot.toml")]);
        assert_eq!(
            ConfigLoader::locate_from(lookup, dir.path()),
            Some(PathBuf::from("/etc/steamstat/bot.toml"))
        );
    }

    #[test]
    fn test_locate_default_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(ConfigLoader::locate_from(lookup_from(&[]), dir.path()), None);

        std::fs::write(dir.path().join("config.toml"), "").unwrap();
        assert_eq!(
            ConfigLoader::locate_from(lookup_from(&[]), dir.path()),
            Some(dir.path().join("config.toml"))
        );

        std::fs::write(dir.path().join("config.yml"), "").unwrap();
        assert_eq!(
            ConfigLoader::locate_from(lookup_from(&[(CONFIG_PATH_ENV, "  ")]), dir.path()),
            Some(dir.path().join("config.yml"))
        );
    }

    #[test]
    fn test_load_from_missing_file_is_config_error() {
        let err = ConfigLoader::load_from(Some(Path::new("/nonexistent/steamstat.yaml")))
            .unwrap_err();
        assert!(matches!(err, SteamStatError::Config { .. }));
    }
}
