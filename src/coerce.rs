//! Converting resolved nodes into requested Rust types.
//!
//! Scalars get limited, fixed coercions (`"true"` is a bool, `"8080"` is an int, `3` is a
//! string). Lists and maps are never coerced from anything else.

use crate::value::{exact_integer, Map, Value};

/// A type a configuration node can be read as.
pub trait Coerce: Sized {
    /// Name used in type-mismatch errors.
    const EXPECTED: &'static str;

    fn coerce(node: &Value) -> Option<Self>;
}

/// Boolean literals in the usual spellings: `1 t T TRUE true True` and their false twins.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl Coerce for bool {
    const EXPECTED: &'static str = "bool";

    fn coerce(node: &Value) -> Option<Self> {
        match node {
            Value::Bool(b) => Some(*b),
            Value::String(s) => parse_bool(s),
            Value::Null | Value::Number(_) | Value::List(_) | Value::Map(_) => None,
        }
    }
}

impl Coerce for f64 {
    const EXPECTED: &'static str = "float64";

    fn coerce(node: &Value) -> Option<Self> {
        match node {
            Value::Number(n) => Some(*n),
            Value::String(s) => s.parse::<f64>().ok(),
            Value::Null | Value::Bool(_) | Value::List(_) | Value::Map(_) => None,
        }
    }
}

impl Coerce for f32 {
    const EXPECTED: &'static str = "float32";

    fn coerce(node: &Value) -> Option<Self> {
        // Out-of-range values would saturate to infinity.
        let n = f64::coerce(node)?;
        let narrowed = n as f32;
        (narrowed.is_finite() || !n.is_finite()).then_some(narrowed)
    }
}

impl Coerce for i64 {
    const EXPECTED: &'static str = "int";

    fn coerce(node: &Value) -> Option<Self> {
        match node {
            Value::Number(n) => exact_integer(*n),
            Value::String(s) => s.parse::<i64>().ok(),
            Value::Null | Value::Bool(_) | Value::List(_) | Value::Map(_) => None,
        }
    }
}

// Narrower integers read as i64 first, then must fit.
macro_rules! coerce_int {
    ($($t:ty => $name:literal),* $(,)?) => {
        $(
            impl Coerce for $t {
                const EXPECTED: &'static str = $name;

                fn coerce(node: &Value) -> Option<Self> {
                    i64::coerce(node).and_then(|i| <$t>::try_from(i).ok())
                }
            }
        )*
    };
}

coerce_int!(
    i32 => "i32",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
);

impl Coerce for String {
    const EXPECTED: &'static str = "string";

    fn coerce(node: &Value) -> Option<Self> {
        match node {
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Null | Value::List(_) | Value::Map(_) => None,
        }
    }
}

impl Coerce for Vec<Value> {
    const EXPECTED: &'static str = "list";

    fn coerce(node: &Value) -> Option<Self> {
        node.as_list().cloned()
    }
}

impl Coerce for Map {
    const EXPECTED: &'static str = "map";

    fn coerce(node: &Value) -> Option<Self> {
        node.as_map().cloned()
    }
}

impl Coerce for Value {
    const EXPECTED: &'static str = "value";

    fn coerce(node: &Value) -> Option<Self> {
        Some(node.clone())
    }
}
