//! Log Formatting Module
//!
//! Renders JSON values for humans: a depth-limited inspector for console
//! output and a plain string form for flat file entries.

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

// == Inspect ==
/// Renders `value` in the style of a console inspector.
///
/// Containers nested deeper than `depth` collapse to `[Object]` or
/// `[Array]`. With `depth == 0` only the top-level container is expanded.
/// A top-level string is printed as-is; nested strings are quoted.
pub fn inspect(value: &Value, depth: usize) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => inspect_nested(other, 0, depth),
    }
}

fn inspect_nested(value: &Value, level: usize, depth: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Array(_) if level > depth => "[Array]".to_string(),
        Value::Array(items) => {
            let inner: Vec<String> = items
                .iter()
                .map(|item| inspect_nested(item, level + 1, depth))
                .collect();
            format!("[ {} ]", inner.join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(_) if level > depth => "[Object]".to_string(),
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(key, item)| {
                    format!("{}: {}", render_key(key), inspect_nested(item, level + 1, depth))
                })
                .collect();
            format!("{{ {} }}", inner.join(", "))
        }
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn render_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };

    if is_identifier {
        key.to_string()
    } else {
        quote(key)
    }
}

// == Plain String ==
/// Flat rendering used when a record is written at shallow depth.
///
/// Strings are unquoted, arrays are comma-joined and objects collapse to
/// `[object Object]`.
pub fn to_plain_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_plain_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

// == Timestamp ==
/// Current UTC time as RFC 3339 with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inspect_scalars() {
        assert_eq!(inspect(&json!(42), 0), "42");
        assert_eq!(inspect(&json!(null), 0), "null");
        assert_eq!(inspect(&json!("top level"), 0), "top level");
    }

    #[test]
    fn test_inspect_depth_zero_collapses_children() {
        let value = json!({"a": 1, "b": {"c": 2}, "d": [1, 2]});
        assert_eq!(inspect(&value, 0), "{ a: 1, b: [Object], d: [Array] }");
    }

    #[test]
    fn test_inspect_depth_one_expands_children() {
        let value = json!({"b": {"c": {"d": 1}}, "s": "x"});
        assert_eq!(inspect(&value, 1), "{ b: { c: [Object] }, s: 'x' }");
    }

    #[test]
    fn test_inspect_empty_containers() {
        assert_eq!(inspect(&json!({"a": {}, "b": []}), 0), "{ a: {}, b: [] }");
    }

    #[test]
    fn test_inspect_quotes_odd_keys() {
        assert_eq!(inspect(&json!({"two words": 1}), 0), "{ 'two words': 1 }");
        assert_eq!(inspect(&json!({"1st": 1}), 0), "{ '1st': 1 }");
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(to_plain_string(&json!("hello")), "hello");
        assert_eq!(to_plain_string(&json!([1, null, "x"])), "1,,x");
        assert_eq!(to_plain_string(&json!({"a": 1})), "[object Object]");
        assert_eq!(to_plain_string(&json!(false)), "false");
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
        // millisecond precision: "YYYY-MM-DDTHH:MM:SS.mmmZ"
        assert_eq!(ts.len(), 24);
    }
}
