/// Utility functions
use serde_json::Value;

/// Extract a field from a JSON object as a string. Upstream sends the AQI
/// values as JSON numbers and the pollutant codes as strings; both are
/// stored as text so they round-trip exactly.
pub fn string_field(v: &Value, key: &str) -> Option<String> {
    match v.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        x if x.is_number() => Some(x.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_field_from_string() {
        let json = serde_json::json!({"mainus": "p2"});
        assert_eq!(string_field(&json, "mainus"), Some("p2".to_string()));
    }

    #[test]
    fn test_string_field_from_number() {
        let json = serde_json::json!({"aqius": 78});
        assert_eq!(string_field(&json, "aqius"), Some("78".to_string()));
    }

    #[test]
    fn test_string_field_empty_string() {
        let json = serde_json::json!({"mainus": ""});
        assert_eq!(string_field(&json, "mainus"), None);
    }

    #[test]
    fn test_string_field_missing() {
        let json = serde_json::json!({"other": 1});
        assert_eq!(string_field(&json, "aqius"), None);
    }
}
