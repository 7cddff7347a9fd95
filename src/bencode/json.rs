use serde_json::{json, Value};

use super::BValue;

/// Key used for byte strings that are not valid UTF-8.
pub const BYTES_HEX_KEY: &str = "_bytes_hex";

/// Convert a `BValue` into JSON (using Serde JSON `Value`).
///
/// - `Integer(i)` => JSON number
/// - `ByteString(bytes)` => string if valid UTF-8, otherwise `{"_bytes_hex": "<hex>"}`
/// - `List(...)` => JSON array
/// - `Dict(...)` => JSON object; keys that are not UTF-8 become `"_bytes_hex:<hex>"`
///
/// Nothing is dropped: binary data such as the `pieces` field of a metainfo
/// file survives as hex.
pub fn bvalue_to_json(bv: &BValue) -> Value {
    match bv {
        BValue::Integer(i) => json!(i),
        BValue::ByteString(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => Value::String(text.to_string()),
            Err(_) => json!({ BYTES_HEX_KEY: hex::encode(bytes) }),
        },
        BValue::List(items) => Value::Array(items.iter().map(bvalue_to_json).collect()),
        BValue::Dict(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                json_map.insert(json_key(k), bvalue_to_json(v));
            }
            Value::Object(json_map)
        }
    }
}

fn json_key(key: &[u8]) -> String {
    match std::str::from_utf8(key) {
        Ok(text) => text.to_string(),
        Err(_) => format!("{}:{}", BYTES_HEX_KEY, hex::encode(key)),
    }
}
