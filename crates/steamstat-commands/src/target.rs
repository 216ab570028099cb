//! Parsing of the `lookup` argument.

use steamstat_common::SteamId;
use url::Url;

const COMMUNITY_HOST: &str = "steamcommunity.com";

/// What the user asked to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTarget {
    /// A SteamID64 given directly or through a `/profiles/` URL
    SteamId(SteamId),
    /// A vanity name given directly or through an `/id/` URL
    Vanity(String),
}

impl LookupTarget {
    /// Interprets one command argument.
    ///
    /// All-digit input is a Steam ID (and must fit in 64 bits). Community
    /// profile URLs reduce to one of the two plain forms. Anything else that
    /// is a single non-empty word is a vanity name. Returns `None` for input
    /// that cannot name an account.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() || input.chars().any(char::is_whitespace) {
            return None;
        }

        if input.starts_with("http://") || input.starts_with("https://") {
            return Self::from_profile_url(input);
        }

        if input.bytes().all(|b| b.is_ascii_digit()) {
            return SteamId::parse_digits(input).map(Self::SteamId);
        }

        Some(Self::Vanity(input.to_string()))
    }

    fn from_profile_url(input: &str) -> Option<Self> {
        let url = Url::parse(input).ok()?;
        let host = url.host_str()?;
        if host != COMMUNITY_HOST && !host.ends_with(".steamcommunity.com") {
            return None;
        }

        let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
        let target = match (segments.next(), segments.next()) {
            (Some("id"), Some(vanity)) => Self::Vanity(vanity.to_string()),
            (Some("profiles"), Some(id)) => Self::SteamId(SteamId::parse_digits(id)?),
            _ => return None,
        };
        Some(target)
    }
}
