//! Recursive key stripping over a `serde_json::Value` tree.
//!
//! Responses arrive as a tree of mappings, sequences and scalars that still
//! carries markup from the SOAP layer. Stripping those keys leaves plain
//! data that can be persisted and reloaded without dragging XML along.

use serde_json::Value;

/// Remove every mapping entry whose key is in `keys`, at any depth.
///
/// Descends into nested mappings and into every element of every sequence
/// (including sequences of sequences). Scalars are left alone. Keys and
/// values not named in `keys` are untouched, and entry order is kept.
pub fn remove_keys_recursively(value: &mut Value, keys: &[&str]) {
    match value {
        Value::Object(map) => {
            map.retain(|key, _| !keys.contains(&key.as_str()));
            for child in map.values_mut() {
                remove_keys_recursively(child, keys);
            }
        }
        Value::Array(items) => {
            for item in items {
                remove_keys_recursively(item, keys);
            }
        }
        _ => {}
    }
}
