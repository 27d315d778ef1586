//! Turning raw parser output (and plain Rust values) into the canonical [`Value`] tree.
//!
//! JSON always produces string keys, YAML does not: `{1: a}` or `{[x]: y}` are legal YAML
//! mappings and are rejected here with `UnsupportedKey`. A failure inside a child is
//! reported by its parent as `UnsupportedValue`, carrying the child's raw form.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{ConfigError, Result};
use crate::value::{Map, Value};

/// Anything that can be brought into the canonical tree.
///
/// Takes `&self` so a failing child can still be shown in the parent's error.
pub trait Normalize {
    fn normalize(&self) -> Result<Value>;
}

/// Normalize any serializable value.
///
/// Goes through `serde_yaml::Value` rather than JSON so that non-string map keys are
/// caught instead of being stringified.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    serde_yaml::to_value(value)?.normalize()
}

fn number(n: f64) -> Result<Value> {
    if n.is_finite() {
        Ok(Value::Number(n))
    } else {
        Err(ConfigError::UnsupportedType {
            kind: format!("non-finite number {}", n),
        })
    }
}

fn normalize_items<'a, I, T>(items: I) -> Result<Value>
where
    I: IntoIterator<Item = &'a T>,
    T: Normalize + fmt::Debug + 'a,
{
    let mut out = Vec::new();
    for item in items {
        out.push(
            item.normalize()
                .map_err(|e| ConfigError::unsupported_value(item, e))?,
        );
    }
    Ok(Value::List(out))
}

fn normalize_entries<'a, I, T>(entries: I) -> Result<Value>
where
    I: IntoIterator<Item = (&'a String, &'a T)>,
    T: Normalize + fmt::Debug + 'a,
{
    let mut out = Map::new();
    for (key, item) in entries {
        let value = item
            .normalize()
            .map_err(|e| ConfigError::unsupported_value(item, e))?;
        out.insert(key.clone(), value);
    }
    Ok(Value::Map(out))
}

impl Normalize for Value {
    fn normalize(&self) -> Result<Value> {
        match self {
            Value::Number(n) => number(*n),
            Value::List(items) => normalize_items(items),
            Value::Map(map) => normalize_entries(map),
            Value::Null | Value::Bool(_) | Value::String(_) => Ok(self.clone()),
        }
    }
}

impl Normalize for serde_json::Value {
    fn normalize(&self) -> Result<Value> {
        match self {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => number(f),
                None => Err(ConfigError::UnsupportedType {
                    kind: format!("number {}", n),
                }),
            },
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            serde_json::Value::Array(items) => normalize_items(items),
            serde_json::Value::Object(map) => normalize_entries(map),
        }
    }
}

impl Normalize for serde_yaml::Value {
    fn normalize(&self) -> Result<Value> {
        match self {
            serde_yaml::Value::Null => Ok(Value::Null),
            serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_yaml::Value::Number(n) => match n.as_f64() {
                Some(f) => number(f),
                None => Err(ConfigError::UnsupportedType {
                    kind: format!("number {}", n),
                }),
            },
            serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
            serde_yaml::Value::Sequence(items) => normalize_items(items),
            serde_yaml::Value::Mapping(mapping) => {
                let mut entries = Vec::with_capacity(mapping.len());
                for (key, item) in mapping {
                    match key {
                        serde_yaml::Value::String(key) => entries.push((key, item)),
                        other => {
                            return Err(ConfigError::UnsupportedKey {
                                key: format!("{:?}", other),
                            });
                        }
                    }
                }
                normalize_entries(entries)
            }
            serde_yaml::Value::Tagged(tagged) => Err(ConfigError::UnsupportedType {
                kind: format!("tagged value {}", tagged.tag),
            }),
        }
    }
}

impl Normalize for bool {
    fn normalize(&self) -> Result<Value> {
        Ok(Value::Bool(*self))
    }
}

impl Normalize for String {
    fn normalize(&self) -> Result<Value> {
        Ok(Value::String(self.clone()))
    }
}

impl Normalize for &str {
    fn normalize(&self) -> Result<Value> {
        Ok(Value::String(self.to_string()))
    }
}

impl Normalize for f64 {
    fn normalize(&self) -> Result<Value> {
        number(*self)
    }
}

impl Normalize for f32 {
    fn normalize(&self) -> Result<Value> {
        number(*self as f64)
    }
}

macro_rules! normalize_int {
    ($($t:ty),*) => {
        $(
            impl Normalize for $t {
                fn normalize(&self) -> Result<Value> {
                    Ok(Value::Number(*self as f64))
                }
            }
        )*
    };
}

normalize_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: Normalize> Normalize for Option<T> {
    fn normalize(&self) -> Result<Value> {
        match self {
            Some(v) => v.normalize(),
            None => Ok(Value::Null),
        }
    }
}

impl<T: Normalize + fmt::Debug> Normalize for Vec<T> {
    fn normalize(&self) -> Result<Value> {
        normalize_items(self)
    }
}

impl<T: Normalize + fmt::Debug> Normalize for HashMap<String, T> {
    fn normalize(&self) -> Result<Value> {
        normalize_entries(self)
    }
}

impl<T: Normalize + fmt::Debug> Normalize for BTreeMap<String, T> {
    fn normalize(&self) -> Result<Value> {
        normalize_entries(self)
    }
}

impl<T: Normalize + fmt::Debug> Normalize for IndexMap<String, T> {
    fn normalize(&self) -> Result<Value> {
        normalize_entries(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_numbers_collapse() {
        let value = json!({"a": 42, "b": 42.0, "c": -3, "d": 0.5}).normalize().unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map["a"], Value::Number(42.0));
        assert_eq!(map["a"], map["b"]);
        assert_eq!(map["c"], Value::Number(-3.0));
        assert_eq!(map["d"], Value::Number(0.5));
    }

    #[test]
    fn test_json_null_and_nesting() {
        let value = json!({"list": [1, "two", null, {"deep": true}]}).normalize().unwrap();
        let list = value.as_map().unwrap()["list"].as_list().unwrap().clone();
        assert_eq!(list.len(), 4);
        assert_eq!(list[1], Value::String("two".into()));
        assert!(list[2].is_null());
        assert_eq!(list[3].as_map().unwrap()["deep"], Value::Bool(true));
    }

    #[test]
    fn test_yaml_string_keys() {
        let raw: serde_yaml::Value = serde_yaml::from_str("a:\n  b: [1, 2]\n").unwrap();
        let value = raw.normalize().unwrap();
        let b = value.as_map().unwrap()["a"].as_map().unwrap()["b"].clone();
        assert_eq!(b, Value::List(vec![Value::Number(1.0), Value::Number(2.0)]));
    }

    #[test]
    fn test_yaml_non_string_key_at_root() {
        let raw: serde_yaml::Value = serde_yaml::from_str("1: one\n").unwrap();
        match raw.normalize() {
            Err(ConfigError::UnsupportedKey { key }) => assert!(key.contains('1')),
            other => panic!("expected UnsupportedKey, got {:?}", other),
        }
    }

    #[test]
    fn test_yaml_nested_bad_key_is_wrapped() {
        let raw: serde_yaml::Value = serde_yaml::from_str("outer:\n  true: yes\n").unwrap();
        match raw.normalize() {
            Err(ConfigError::UnsupportedValue { raw, source }) => {
                assert!(raw.contains("yes"));
                assert!(matches!(*source, ConfigError::UnsupportedKey { .. }));
            }
            other => panic!("expected UnsupportedValue, got {:?}", other),
        }
    }

    #[test]
    fn test_yaml_tagged_value_is_unsupported() {
        let raw: serde_yaml::Value = serde_yaml::from_str("!custom 5").unwrap();
        assert!(matches!(
            raw.normalize(),
            Err(ConfigError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_non_finite_number_is_unsupported() {
        assert!(matches!(
            f64::NAN.normalize(),
            Err(ConfigError::UnsupportedType { .. })
        ));
        let raw: serde_yaml::Value = serde_yaml::from_str("x: .inf\n").unwrap();
        assert!(matches!(
            raw.normalize(),
            Err(ConfigError::UnsupportedValue { .. })
        ));
    }

    #[test]
    fn test_rust_values() {
        let mut ports = BTreeMap::new();
        ports.insert("http".to_string(), 80u16);
        ports.insert("https".to_string(), 443u16);
        let value = ports.normalize().unwrap();
        assert_eq!(value.as_map().unwrap()["https"], Value::Number(443.0));

        assert_eq!(Some("x").normalize().unwrap(), Value::String("x".into()));
        assert_eq!(None::<bool>.normalize().unwrap(), Value::Null);
        assert_eq!(
            vec![1i32, 2].normalize().unwrap(),
            Value::List(vec![Value::Number(1.0), Value::Number(2.0)])
        );
    }

    #[test]
    fn test_children_need_not_be_clone() {
        #[derive(Debug)]
        struct Port(u16);

        impl Normalize for Port {
            fn normalize(&self) -> Result<Value> {
                if self.0 == 0 {
                    return Err(ConfigError::UnsupportedType {
                        kind: "port 0".into(),
                    });
                }
                self.0.normalize()
            }
        }

        let value = vec![Port(80), Port(443)].normalize().unwrap();
        assert_eq!(
            value,
            Value::List(vec![Value::Number(80.0), Value::Number(443.0)])
        );

        match vec![Port(80), Port(0)].normalize() {
            Err(ConfigError::UnsupportedValue { raw, source }) => {
                assert_eq!(raw, "Port(0)");
                assert!(matches!(*source, ConfigError::UnsupportedType { .. }));
            }
            other => panic!("expected UnsupportedValue, got {:?}", other),
        }
    }

    #[test]
    fn test_to_value_catches_non_string_keys() {
        #[derive(Serialize)]
        struct Server {
            host: String,
            port: u16,
        }
        let value = to_value(&Server {
            host: "localhost".into(),
            port: 8080,
        })
        .unwrap();
        assert_eq!(value.as_map().unwrap()["port"], Value::Number(8080.0));

        let mut by_id = BTreeMap::new();
        by_id.insert(1u32, "one");
        assert!(matches!(
            to_value(&by_id),
            Err(ConfigError::UnsupportedKey { .. })
        ));
    }
}
