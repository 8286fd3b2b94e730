//! API response normalization
//!
//! The admin API answers list calls in several shapes:
//! ```json
//! { "data": [ ... ], "message": "ok", "success": true }
//! [ ... ]
//! { "orders": [ ... ] }
//! ```
//! The client resolves the shape once, here, so callers only ever see a
//! `Vec<T>`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default list key
pub const DATA_KEY: &str = "data";

/// Acknowledgement envelope returned by write endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ApiMessage {
    /// Read an acknowledgement out of any JSON value; non-objects give an empty one
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value.clone()).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

/// Pull the list out of a response.
///
/// Tries, in order: a bare array, then each of `keys` on an object (first
/// array wins). Anything else is an empty list.
pub fn extract_list(value: Value, keys: &[&str]) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in keys {
                if let Some(Value::Array(items)) = map.remove(*key) {
                    return items;
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Pull the list out of a response and decode each element.
///
/// Elements that are not objects or fail to decode are skipped with a
/// warning; one bad row never empties the list.
pub fn decode_list<T: DeserializeOwned>(value: Value, keys: &[&str]) -> Vec<T> {
    extract_list(value, keys)
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| {
            if !item.is_object() {
                tracing::warn!(index = idx, "Skipping non-object list element");
                return None;
            }
            match serde_json::from_value::<T>(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(index = idx, error = %e, "Skipping undecodable list element");
                    None
                }
            }
        })
        .collect()
}

/// Pull a single record out of a response: the first object under `keys`,
/// else the response itself when it is an object.
pub fn extract_record(value: Value, keys: &[&str]) -> Option<Value> {
    match value {
        Value::Object(mut map) => {
            for key in keys {
                if let Some(inner @ Value::Object(_)) = map.remove(*key) {
                    return Some(inner);
                }
            }
            Some(Value::Object(map))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Row {
        id: i64,
    }

    #[test]
    fn test_wrapped_and_bare_lists() {
        let wrapped = json!({"data": [{"id": 1}, {"id": 2}], "success": true});
        assert_eq!(extract_list(wrapped, &[DATA_KEY]).len(), 2);

        let bare = json!([{"id": 1}]);
        assert_eq!(extract_list(bare, &[DATA_KEY]).len(), 1);
    }

    #[test]
    fn test_keyed_lists_follow_key_order() {
        let value = json!({"orders": [{"id": 1}], "data": [{"id": 2}, {"id": 3}]});
        assert_eq!(extract_list(value.clone(), &["orders", DATA_KEY]).len(), 1);
        assert_eq!(extract_list(value, &[DATA_KEY, "orders"]).len(), 2);
    }

    #[test]
    fn test_unrecognized_shapes_are_empty() {
        assert!(extract_list(json!({"data": {"id": 1}}), &[DATA_KEY]).is_empty());
        assert!(extract_list(json!("nope"), &[DATA_KEY]).is_empty());
        assert!(extract_list(Value::Null, &[DATA_KEY]).is_empty());
    }

    #[test]
    fn test_decode_list_skips_bad_rows() {
        let value = json!({"data": [{"id": 1}, 7, {"id": "x"}, {"id": 4}]});
        let rows: Vec<Row> = decode_list(value, &[DATA_KEY]);
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn test_extract_record() {
        let wrapped = json!({"order": {"id": 9}, "message": "ok"});
        assert_eq!(extract_record(wrapped, &["order"]).unwrap()["id"], 9);
        let bare = json!({"id": 3});
        assert_eq!(extract_record(bare, &["data"]).unwrap()["id"], 3);
        assert!(extract_record(json!([1]), &["data"]).is_none());
    }

    #[test]
    fn test_api_message() {
        let msg = ApiMessage::from_value(&json!({"message": "created", "success": true}));
        assert_eq!(msg.message.as_deref(), Some("created"));
        assert_eq!(msg.success, Some(true));
        assert!(ApiMessage::from_value(&json!([])).message.is_none());
    }
}
