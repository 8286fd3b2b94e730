//! Decoding helpers for the loosely typed admin API
//!
//! The backend sends ids as numbers or strings, amounts as numbers or numeric
//! strings, and omits fields freely. These helpers are meant for
//! `#[serde(default, deserialize_with = "...")]` so a sloppy field never fails
//! the whole record.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Current UTC timestamp (seconds)
pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Render a scalar JSON value as a trimmed string.
///
/// Strings are trimmed (empty becomes `None`), numbers and booleans are
/// rendered, anything else is `None`.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { None } else { Some(s.to_string()) }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a number out of a JSON value, accepting numeric strings.
pub fn scalar_to_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Id that may arrive as a number or a string.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(deserializer)
}

/// Any scalar rendered as a string; objects, arrays and null become `None`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_to_string))
}

/// Number that may arrive as a JSON number or a numeric string.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_to_f64))
}

/// Integer that may arrive as a JSON number or a numeric string.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }))
}

/// Boolean that may arrive as `true`, `1` or `"true"`.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }))
}

/// `null` decodes like a missing key: the type's default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// List that may arrive as `null`, which is an empty list.
pub fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    null_as_default(deserializer)
}

/// Placeholder used when a timestamp is missing or unparseable
pub const UNKNOWN_DATE: &str = "Unknown";

/// Format a backend timestamp as `YYYY-MM-DD`.
///
/// Accepts RFC 3339, naive `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS[.f]`
/// and bare dates. Anything else yields [`UNKNOWN_DATE`].
pub fn display_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return UNKNOWN_DATE.to_string();
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.date().format("%Y-%m-%d").to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    UNKNOWN_DATE.to_string()
}

/// Today's date as `YYYY-MM-DD` (UTC)
pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient_id")]
        id: Option<String>,
        #[serde(default, deserialize_with = "lenient_f64")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "lenient_bool")]
        flag: Option<bool>,
    }

    #[test]
    fn test_lenient_fields_accept_numbers_and_strings() {
        let p: Sample = serde_json::from_value(json!({"id": 42, "amount": "12.50", "flag": 1})).unwrap();
        assert_eq!(p.id.as_deref(), Some("42"));
        assert_eq!(p.amount, Some(12.5));
        assert_eq!(p.flag, Some(true));

        let p: Sample = serde_json::from_value(json!({"id": " abc ", "amount": 3, "flag": "false"})).unwrap();
        assert_eq!(p.id.as_deref(), Some("abc"));
        assert_eq!(p.amount, Some(3.0));
        assert_eq!(p.flag, Some(false));
    }

    #[test]
    fn test_lenient_fields_tolerate_missing_and_garbage() {
        let p: Sample = serde_json::from_value(json!({})).unwrap();
        assert!(p.id.is_none() && p.amount.is_none() && p.flag.is_none());

        let p: Sample = serde_json::from_value(json!({"id": null, "amount": "n/a", "flag": {}})).unwrap();
        assert!(p.id.is_none());
        assert!(p.amount.is_none());
        assert!(p.flag.is_none());
    }

    #[derive(Debug, Deserialize)]
    struct Listing {
        #[serde(default, deserialize_with = "lenient_vec")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        label: String,
    }

    #[test]
    fn test_null_lists_and_text_decode_as_empty() {
        let l: Listing = serde_json::from_value(json!({"tags": null, "label": null})).unwrap();
        assert!(l.tags.is_empty());
        assert!(l.label.is_empty());

        let l: Listing = serde_json::from_value(json!({"tags": ["a", "b"]})).unwrap();
        assert_eq!(l.tags, vec!["a", "b"]);
        assert!(serde_json::from_value::<Listing>(json!({"tags": "a"})).is_err());
    }

    #[test]
    fn test_display_date_formats() {
        assert_eq!(display_date(Some("2024-03-05T10:11:12.000Z")), "2024-03-05");
        assert_eq!(display_date(Some("2024-03-05 10:11:12")), "2024-03-05");
        assert_eq!(display_date(Some("2024-03-05")), "2024-03-05");
        assert_eq!(display_date(Some("yesterday")), UNKNOWN_DATE);
        assert_eq!(display_date(None), UNKNOWN_DATE);
    }
}
