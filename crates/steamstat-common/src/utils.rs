//! Shared text and number formatting helpers.

/// Formats a playtime given in minutes as hours with two decimals.
#[allow(clippy::cast_precision_loss)]
pub fn format_hours(minutes: u64) -> String {
    format!("{:.2}", minutes as f64 / 60.0)
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
