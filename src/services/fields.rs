//! Helpers for reading user-supplied rows

use serde_json::{Map, Value};

/// Normalize a column header: lowercase with spaces and underscores removed,
/// so `No PP`, `no_pp` and `NOPP` compare equal
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != ' ' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve `key` against `row`, ignoring case and spaces in both.
///
/// Returns the string rendering of the cell, or an empty string when the key
/// is missing or the value is null.
pub fn lookup(row: &Map<String, Value>, key: &str) -> String {
    let wanted = normalize_key(key);

    row.iter()
        .find(|(candidate, _)| normalize_key(candidate) == wanted)
        .map(|(_, value)| render(value))
        .unwrap_or_default()
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Decode a persisted comma-delimited id list. Items are not trimmed.
pub fn split_comma_list(value: Option<&str>) -> Vec<String> {
    match value {
        None | Some("") => Vec::new(),
        Some(list) => list.split(',').map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_lookup_ignores_case_and_spaces() {
        let r = row(json!({ "No PP": "x" }));
        assert_eq!(lookup(&r, "no_pp"), "x");
        assert_eq!(lookup(&r, "nopp"), "x");
        assert_eq!(lookup(&r, "NO PP"), "x");
    }

    #[test]
    fn test_lookup_renders_scalars() {
        let r = row(json!({
            "Percent Progress": 42,
            "Ratio": 0.5,
            "Is Closed": true,
            "Remarks": null,
        }));
        assert_eq!(lookup(&r, "percentprogress"), "42");
        assert_eq!(lookup(&r, "ratio"), "0.5");
        assert_eq!(lookup(&r, "is closed"), "true");
        assert_eq!(lookup(&r, "remarks"), "");
    }

    #[test]
    fn test_lookup_missing_key_is_empty() {
        let r = row(json!({ "vendor": "V" }));
        assert_eq!(lookup(&r, "project"), "");
    }

    #[test]
    fn test_split_comma_list() {
        assert!(split_comma_list(None).is_empty());
        assert!(split_comma_list(Some("")).is_empty());
        assert_eq!(split_comma_list(Some("a")), vec!["a"]);
        assert_eq!(split_comma_list(Some("a,b,,c")), vec!["a", "b", "", "c"]);
        assert_eq!(split_comma_list(Some("a, b")), vec!["a", " b"]);
    }
}
