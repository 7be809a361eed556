use serde::{Deserialize, Deserializer};
use serde_json::Value;

// Spreadsheet exports store IDs and phone numbers as numbers; accept any scalar as text.
fn scalar_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Keeps empty strings: used where the value is compared, not displayed.
pub fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_to_text))
}

/// Treats empty strings as missing, so they render as the placeholder.
pub fn display_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_to_text).filter(|s| !s.is_empty()))
}

/// Only JSON strings survive, empty ones included: join and credential keys
/// are compared strictly, so `1042` never equals `"1042"`.
pub fn strict_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Strict key that is also displayed: empty strings count as missing.
pub fn strict_display_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(strict_text(deserializer)?.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Keyed {
        #[serde(default, deserialize_with = "super::strict_text")]
        key: Option<String>,
        #[serde(default, deserialize_with = "super::strict_display_text")]
        shown_key: Option<String>,
        #[serde(default, deserialize_with = "super::display_text")]
        label: Option<String>,
    }

    fn parse(json: &str) -> Keyed {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_strict_keys_drop_non_strings() {
        let keyed = parse(r#"{"key": 1042, "shown_key": true, "label": 1042}"#);
        assert_eq!(keyed.key, None);
        assert_eq!(keyed.shown_key, None);
        assert_eq!(keyed.label.as_deref(), Some("1042"));
    }

    #[test]
    fn test_strict_key_keeps_empty_string() {
        let keyed = parse(r#"{"key": "", "shown_key": ""}"#);
        assert_eq!(keyed.key.as_deref(), Some(""));
        assert_eq!(keyed.shown_key, None);
    }
}
