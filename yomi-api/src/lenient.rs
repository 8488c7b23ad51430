//! Field lookup for loosely-shaped JSON.
//!
//! The services behind the overlay do not agree on field names, so lookups
//! try a list of candidates in order. Empty strings count as missing.

use serde_json::Value;

/// First non-empty text among `keys`. Numbers are rendered as text.
pub fn first_text(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match value.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// First array among `keys`.
pub fn first_array<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter().find_map(|key| value.get(*key)?.as_array())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn skips_empty_and_missing() {
        let v = json!({"a": "", "c": "third"});
        assert_eq!(first_text(&v, &["a", "b", "c"]), Some("third".to_string()));
    }

    #[test]
    fn renders_numbers() {
        let v = json!({"n": 42});
        assert_eq!(first_text(&v, &["n"]), Some("42".to_string()));
    }

    #[test]
    fn non_object_has_no_fields() {
        assert_eq!(first_text(&json!("plain"), &["text"]), None);
        assert!(first_array(&json!([1, 2]), &["tokens"]).is_none());
    }
}
