//! Module implement the key layout for derived index entries.
//!
//! A derived entry for index `name` and field value `value` is stored under
//! `/<name>/<value>`, where value is in its string form, refer [stringify].
//! Primary keys are stringified the same way, so that an integer key `1` and
//! string key `"1"` address the same document.

use serde_json::Value;

/// Separator between the components of a derived index key.
pub const SEP: char = '/';

/// Return the string form of `value`. Strings are taken verbatim, numbers
/// and booleans in their literal form, `null` as "null", arrays and objects
/// as compact JSON text.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(val) => val.to_string(),
        Value::Number(num) => num.to_string(),
        val @ Value::Array(_) | val @ Value::Object(_) => val.to_string(),
    }
}

/// Compose the derived key for index `name` and field `value`.
pub fn index_key(name: &str, value: &Value) -> String {
    format!("{}{}{}{}", SEP, name, SEP, stringify(value))
}

/// Prefix common to all derived keys of index `name`, sorts before all of
/// them.
pub fn index_prefix(name: &str) -> String {
    format!("{}{}{}", SEP, name, SEP)
}

/// Split a derived key into (index-name, field-value). Return None if `key`
/// is not a derived key.
pub fn parse_index_key(key: &str) -> Option<(&str, &str)> {
    let rest = key.strip_prefix(SEP)?;
    let n = rest.find(SEP)?;
    match &rest[..n] {
        "" => None,
        name => Some((name, &rest[n + 1..])),
    }
}

/// Return the indexable field `name` from document. Fields set to `null`
/// and documents that are not objects have nothing to index.
pub fn field<'a>(doc: &'a Value, name: &str) -> Option<&'a Value> {
    match doc.get(name)? {
        Value::Null => None,
        val => Some(val),
    }
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;
