//! User-facing reply texts.

/// Reply to `start`.
pub const GREETING: &str =
    "Hi! Send me a Steam ID or profile name with /lookup <Steam ID or profile name>.";

/// Reply to a missing or malformed `lookup` argument.
pub const USAGE: &str = "Please provide a valid Steam ID or profile name. \
                         Example: /lookup 76561198064159857 or /lookup myvanityurl";

/// Reply when a profile name has no matching Steam ID.
pub const RESOLUTION_FAILED: &str = "Could not find a Steam ID for that profile name.";

/// Reply when the profile or the library could not be fetched.
pub const DATA_UNAVAILABLE: &str = "Could not fetch the user's game information.";

/// Reply when Steam could not be reached.
pub const UPSTREAM_UNAVAILABLE: &str = "Steam is temporarily unavailable, please try again later.";

/// Maximum length of a Discord message.
pub const MAX_MESSAGE_CHARS: usize = 2000;
