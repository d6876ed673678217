use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Table name type alias for clarity.
pub type TableName = String;

/// A single record in a table: column name to value. Rows carry the
/// synthetic `id` column once stored.
pub type Row = BTreeMap<String, Value>;

/// Core value type for table cells.
///
/// A closed sum type rather than a dynamically-typed blob: every cell
/// is one of text, number, or boolean. Date-typed columns store their
/// value as text that validated as a parseable date at insert time.
///
/// Untagged serde representation, so JSON scalars map directly
/// (`"x"` / `1.5` / `true`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl Value {
    /// Returns the type name as a string, useful for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Truthiness for `exists`/`not-exists` predicates: empty text,
    /// zero, NaN, and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Boolean(b) => *b,
        }
    }

    /// Lossy numeric coercion used by aggregation: numbers pass
    /// through, text parses as f64 or yields NaN, booleans map to 1/0.
    pub fn as_number_lossy(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
            Self::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Same-variant ordering for comparison predicates. Cross-variant
    /// comparisons (and NaN) yield `None`, so ordering predicates fail
    /// instead of coercing.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b),
            (Self::Boolean(a), Self::Boolean(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

// Manual PartialEq: strict equality, no cross-variant coercion.
// NaN != NaN, matching IEEE semantics.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// From conversions for ergonomic value construction
// ---------------------------------------------------------------------------

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Text(s) => serde_json::Value::String(s),
            Value::Number(n) => serde_json::json!(n),
            Value::Boolean(b) => serde_json::Value::Bool(b),
        }
    }
}

/// Helper macro for constructing a `Row` inline.
///
/// # Example
/// ```
/// use mem_db::row;
///
/// let r = row! {
///     "name" => "Alice",
///     "salary" => "20000",
/// };
/// assert_eq!(r.len(), 2);
/// ```
#[macro_export]
macro_rules! row {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut map: $crate::values::Row = std::collections::BTreeMap::new();
        $(
            map.insert($key.to_string(), $crate::values::Value::from($value));
        )*
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names() {
        assert_eq!(Value::from("hi").type_name(), "string");
        assert_eq!(Value::from(1.5).type_name(), "number");
        assert_eq!(Value::from(true).type_name(), "boolean");
    }

    #[test]
    fn strict_equality() {
        assert_eq!(Value::from("1"), Value::from("1"));
        assert_ne!(Value::from("1"), Value::from(1.0));
        assert_ne!(Value::from(1.0), Value::from(true));
        assert_eq!(Value::from(42i64), Value::from(42.0));
    }

    #[test]
    fn truthiness() {
        assert!(Value::from("x").is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from(1.0).is_truthy());
        assert!(!Value::from(0.0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
        assert!(Value::from(true).is_truthy());
        assert!(!Value::from(false).is_truthy());
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(Value::from(2.5).as_number_lossy(), 2.5);
        assert_eq!(Value::from("20000").as_number_lossy(), 20000.0);
        assert!(Value::from("abc").as_number_lossy().is_nan());
        assert_eq!(Value::from(true).as_number_lossy(), 1.0);
        assert_eq!(Value::from(false).as_number_lossy(), 0.0);
    }

    #[test]
    fn same_variant_comparison() {
        assert_eq!(
            Value::from("abc").compare(&Value::from("abd")),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::from(2.0).compare(&Value::from(1.0)),
            Some(Ordering::Greater)
        );
        assert_eq!(Value::from("1").compare(&Value::from(1.0)), None);
        assert_eq!(Value::Number(f64::NAN).compare(&Value::from(1.0)), None);
    }

    #[test]
    fn json_serialization() {
        assert_eq!(serde_json::to_string(&Value::from("a")).unwrap(), "\"a\"");
        assert_eq!(serde_json::to_string(&Value::from(true)).unwrap(), "true");
        let v: Value = serde_json::from_str("3.5").unwrap();
        assert_eq!(v, Value::from(3.5));
        let v: Value = serde_json::from_str("false").unwrap();
        assert_eq!(v, Value::from(false));
    }

    #[test]
    fn row_macro() {
        let r = row! {
            "name" => "Alice",
            "on_contract" => true,
        };
        assert_eq!(r.get("name"), Some(&Value::from("Alice")));
        assert_eq!(r.get("on_contract"), Some(&Value::from(true)));
    }
}
