/// Placeholder rendered for any missing field.
pub const MISSING: &str = "-";

/// Returns the value for display, or `-` when it is missing.
pub fn or_placeholder(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_string()
}

/// Trims and lower-cases a search query.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Case-insensitive containment; `needle` must already be lower-cased.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
