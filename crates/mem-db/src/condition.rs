use crate::values::{Row, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single-column filter predicate.
///
/// A condition list is an implicit conjunction: a row matches iff it
/// passes every predicate, vacuously so when the list is empty.
///
/// Tagged serde representation matches the wire shape of the query
/// layer (`{"type": "greater-than", "column": ..., "value": ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Condition {
    Exists { column: String },
    NotExists { column: String },
    Equals { column: String, value: Value },
    NotEquals { column: String, value: Value },
    GreaterThan { column: String, value: Value },
    LessThan { column: String, value: Value },
    GreaterThanOrEquals { column: String, value: Value },
    LessThanOrEquals { column: String, value: Value },
}

impl Condition {
    pub fn exists(column: impl Into<String>) -> Self {
        Self::Exists {
            column: column.into(),
        }
    }

    pub fn not_exists(column: impl Into<String>) -> Self {
        Self::NotExists {
            column: column.into(),
        }
    }

    pub fn equals(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn not_equals(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::NotEquals {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn greater_than(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::GreaterThan {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn less_than(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::LessThan {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Whether a row passes this predicate. A missing column is falsy
    /// for existence checks, unequal for equality, and incomparable
    /// (fails) for ordering checks.
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Self::Exists { column } => row.get(column).is_some_and(Value::is_truthy),
            Self::NotExists { column } => !row.get(column).is_some_and(Value::is_truthy),
            Self::Equals { column, value } => row.get(column) == Some(value),
            Self::NotEquals { column, value } => row.get(column) != Some(value),
            Self::GreaterThan { column, value } => {
                compare(row, column, value) == Some(Ordering::Greater)
            }
            Self::LessThan { column, value } => compare(row, column, value) == Some(Ordering::Less),
            Self::GreaterThanOrEquals { column, value } => {
                matches!(
                    compare(row, column, value),
                    Some(Ordering::Greater | Ordering::Equal)
                )
            }
            Self::LessThanOrEquals { column, value } => {
                matches!(
                    compare(row, column, value),
                    Some(Ordering::Less | Ordering::Equal)
                )
            }
        }
    }
}

fn compare(row: &Row, column: &str, value: &Value) -> Option<Ordering> {
    row.get(column)?.compare(value)
}

/// Conjunction over the condition list, short-circuiting on the first
/// failed predicate.
pub fn matches_all(conditions: &[Condition], row: &Row) -> bool {
    conditions.iter().all(|condition| condition.matches(row))
}
