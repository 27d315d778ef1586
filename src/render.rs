//! Rendering canonical trees back to text.
//!
//! Values map straight onto serde's data model: null, bool, number, string, sequence, map.
//! Numbers that are exact integers are written without a fractional part, so `42` survives
//! a parse/render cycle as `42` rather than `42.0`.

use crate::error::Result;
use crate::value::Value;

/// Render a value as compact JSON.
///
/// # Examples
/// ```
/// use dotted_cfg::{render, Config};
///
/// let cfg = Config::from_yaml("port: 8080\nhosts: [a, b]\n").unwrap();
/// let json = render::to_json(&cfg.to_value().unwrap()).unwrap();
/// assert_eq!(json, r#"{"port":8080,"hosts":["a","b"]}"#);
/// ```
pub fn to_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

pub fn to_json_pretty(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn to_yaml(value: &Value) -> Result<String> {
    Ok(serde_yaml::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Normalize;
    use crate::value::Map;

    fn sample() -> Value {
        let mut db = Map::new();
        db.insert("host".into(), Value::String("localhost".into()));
        db.insert("port".into(), Value::Number(5432.0));
        db.insert("ratio".into(), Value::Number(0.75));
        db.insert("replica".into(), Value::Null);
        let mut root = Map::new();
        root.insert("database".into(), Value::Map(db));
        root.insert(
            "users".into(),
            Value::List(vec![Value::String("calvin".into()), Value::Bool(true)]),
        );
        Value::Map(root)
    }

    #[test]
    fn test_json_output() {
        let json = to_json(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"database":{"host":"localhost","port":5432,"ratio":0.75,"replica":null},"users":["calvin",true]}"#
        );
    }

    #[test]
    fn test_json_round_trip() {
        let text = to_json_pretty(&sample()).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(raw.normalize().unwrap(), sample());
    }

    #[test]
    fn test_yaml_round_trip() {
        let text = to_yaml(&sample()).unwrap();
        assert!(text.contains("port: 5432"));
        let raw: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(raw.normalize().unwrap(), sample());
    }

    #[test]
    fn test_round_trip_collapses_integer_forms() {
        let raw: serde_json::Value = serde_json::from_str(r#"{"a": 42.0}"#).unwrap();
        let value = raw.normalize().unwrap();
        assert_eq!(to_json(&value).unwrap(), r#"{"a":42}"#);
    }
}
