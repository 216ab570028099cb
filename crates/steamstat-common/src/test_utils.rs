//! Test utilities and shared test helpers for SteamStat Bot.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Steam identifiers shared by the test suites.
pub mod steam_fixtures {
    use crate::{AppId, SteamId};

    /// A well-formed SteamID64.
    pub fn test_steam_id() -> SteamId {
        SteamId(76_561_198_064_159_857)
    }

    /// A vanity name used by resolution tests.
    pub fn test_vanity() -> &'static str {
        "gabelogannewell"
    }

    /// Create multiple sequential app IDs.
    pub fn test_app_ids(count: u32) -> Vec<AppId> {
        (0..count).map(|i| AppId(10 + i * 10)).collect()
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
discord:
  token: "test_token"

steam:
  api_key: "test_api_key"
"#
    }

    /// Create a full test configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "discord:\n",
            "  token: \"test_token_full\"\n",
            "  command_prefix: \"?\"\n",
            "\n",
            "steam:\n",
            "  api_key: \"test_api_key_full\"\n",
            "  api_base_url: \"http://localhost:9000\"\n",
            "  store_base_url: \"http://localhost:9001\"\n",
            "  country_code: \"ru\"\n",
            "  request_timeout_seconds: 5\n",
            "  price_concurrency: 4\n",
            "  default_currency_label: \"RUB\"\n",
            "\n",
            "cache:\n",
            "  ttl_seconds: 120\n",
            "  max_capacity: 50\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  json_format: true\n"
        )
    }

    /// Create a minimal valid test configuration as TOML string.
    pub fn minimal_config_toml() -> &'static str {
        r#"
[discord]
token = "toml_token"

[steam]
api_key = "toml_api_key"

[cache]
ttl_seconds = 30
"#
    }
}

/// Property-based testing utilities using proptest.
pub mod property_testing {
    use crate::SteamId;
    use proptest::prelude::*;

    /// Strategy for generating SteamID64 values in the individual-account range.
    pub fn steam_id_strategy() -> impl Strategy<Value = SteamId> {
        (76_561_197_960_265_728u64..=76_561_202_255_233_023u64).prop_map(SteamId)
    }

    /// Strategy for generating vanity names accepted by Steam.
    pub fn vanity_strategy() -> impl Strategy<Value = String> {
        r"[a-z_][a-zA-Z0-9_-]{2,31}".prop_map(|s| s.to_string())
    }
}
