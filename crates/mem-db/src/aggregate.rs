use crate::values::{Row, Value};
use serde::{Deserialize, Serialize};

/// Reduction applied to one column over a filtered row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    /// Raw value of the column on the first filtered row; only
    /// meaningful on size-1 result contexts.
    None,
    Sum,
    Average,
    Min,
    Max,
    Distinct,
    Count,
}

/// One output field of an aggregate query: source column, reduction,
/// and output key (alias, defaulting to the column name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSelection {
    pub operation: AggregateOp,
    pub column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ColumnSelection {
    pub fn new(operation: AggregateOp, column: impl Into<String>) -> Self {
        Self {
            operation,
            column: column.into(),
            alias: None,
        }
    }

    pub fn aliased(
        operation: AggregateOp,
        column: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            column: column.into(),
            alias: Some(alias.into()),
        }
    }

    pub fn output_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.column)
    }
}

/// Result of one reduction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AggregateValue {
    Number(f64),
    Count(usize),
    Single(Option<Value>),
    Distinct(Vec<Value>),
}

impl AggregateValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Count(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<usize> {
        match self {
            Self::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_values(&self) -> Option<&[Value]> {
        match self {
            Self::Distinct(values) => Some(values),
            _ => None,
        }
    }
}

impl From<AggregateValue> for serde_json::Value {
    fn from(v: AggregateValue) -> Self {
        match v {
            AggregateValue::Number(n) => serde_json::json!(n),
            AggregateValue::Count(n) => serde_json::json!(n),
            AggregateValue::Single(value) => value
                .map(serde_json::Value::from)
                .unwrap_or(serde_json::Value::Null),
            AggregateValue::Distinct(values) => {
                serde_json::Value::Array(values.into_iter().map(serde_json::Value::from).collect())
            }
        }
    }
}

/// Apply one column selection to the filtered row set.
///
/// Numeric reductions coerce the column lossily (missing columns
/// coerce to NaN). `average` guards the empty set with 0; `min`/`max`
/// keep their infinity seeds on an empty set and leave the special
/// case to the caller. `distinct` preserves order of first appearance,
/// so repeated calls over unchanged data are deterministic.
pub fn reduce(selection: &ColumnSelection, rows: &[&Row]) -> AggregateValue {
    let column = selection.column.as_str();
    let number = |row: &Row| {
        row.get(column)
            .map(Value::as_number_lossy)
            .unwrap_or(f64::NAN)
    };
    match selection.operation {
        AggregateOp::None => {
            AggregateValue::Single(rows.first().and_then(|row| row.get(column)).cloned())
        }
        AggregateOp::Sum => AggregateValue::Number(rows.iter().map(|row| number(row)).sum()),
        AggregateOp::Average => {
            if rows.is_empty() {
                return AggregateValue::Number(0.0);
            }
            let sum: f64 = rows.iter().map(|row| number(row)).sum();
            AggregateValue::Number(sum / rows.len() as f64)
        }
        AggregateOp::Min => AggregateValue::Number(
            rows.iter()
                .fold(f64::INFINITY, |min, row| min.min(number(row))),
        ),
        AggregateOp::Max => AggregateValue::Number(
            rows.iter()
                .fold(f64::NEG_INFINITY, |max, row| max.max(number(row))),
        ),
        AggregateOp::Distinct => {
            let mut seen: Vec<Value> = Vec::new();
            for row in rows {
                if let Some(value) = row.get(column) {
                    if !seen.contains(value) {
                        seen.push(value.clone());
                    }
                }
            }
            AggregateValue::Distinct(seen)
        }
        AggregateOp::Count => AggregateValue::Count(rows.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    fn rows() -> Vec<Row> {
        vec![
            row! { "salary" => "20000", "department" => "Engineering" },
            row! { "salary" => "10000", "department" => "Engineering" },
            row! { "salary" => "13580", "department" => "Creative" },
        ]
    }

    fn refs(rows: &[Row]) -> Vec<&Row> {
        rows.iter().collect()
    }

    #[test]
    fn sum_coerces_text() {
        let rows = rows();
        let result = reduce(&ColumnSelection::new(AggregateOp::Sum, "salary"), &refs(&rows));
        assert_eq!(result, AggregateValue::Number(43580.0));
    }

    #[test]
    fn average_and_empty_guard() {
        let rows = rows();
        let result = reduce(
            &ColumnSelection::new(AggregateOp::Average, "salary"),
            &refs(&rows),
        );
        assert_eq!(result.as_f64(), Some(43580.0 / 3.0));

        let result = reduce(&ColumnSelection::new(AggregateOp::Average, "salary"), &[]);
        assert_eq!(result, AggregateValue::Number(0.0));
    }

    #[test]
    fn min_max() {
        let rows = rows();
        let min = reduce(&ColumnSelection::new(AggregateOp::Min, "salary"), &refs(&rows));
        let max = reduce(&ColumnSelection::new(AggregateOp::Max, "salary"), &refs(&rows));
        assert_eq!(min, AggregateValue::Number(10000.0));
        assert_eq!(max, AggregateValue::Number(20000.0));
    }

    #[test]
    fn min_max_empty_set_keeps_seeds() {
        let min = reduce(&ColumnSelection::new(AggregateOp::Min, "salary"), &[]);
        let max = reduce(&ColumnSelection::new(AggregateOp::Max, "salary"), &[]);
        assert_eq!(min, AggregateValue::Number(f64::INFINITY));
        assert_eq!(max, AggregateValue::Number(f64::NEG_INFINITY));
    }

    #[test]
    fn distinct_keeps_first_appearance_order() {
        let rows = rows();
        let result = reduce(
            &ColumnSelection::new(AggregateOp::Distinct, "department"),
            &refs(&rows),
        );
        assert_eq!(
            result.as_values().unwrap(),
            &[Value::from("Engineering"), Value::from("Creative")]
        );
    }

    #[test]
    fn count() {
        let rows = rows();
        let result = reduce(&ColumnSelection::new(AggregateOp::Count, "salary"), &refs(&rows));
        assert_eq!(result, AggregateValue::Count(3));
    }

    #[test]
    fn none_takes_first_raw_value() {
        let rows = rows();
        let result = reduce(&ColumnSelection::new(AggregateOp::None, "salary"), &refs(&rows));
        assert_eq!(result, AggregateValue::Single(Some(Value::from("20000"))));

        let result = reduce(&ColumnSelection::new(AggregateOp::None, "salary"), &[]);
        assert_eq!(result, AggregateValue::Single(None));
    }

    #[test]
    fn output_key_defaults_to_column() {
        let plain = ColumnSelection::new(AggregateOp::Min, "salary");
        assert_eq!(plain.output_key(), "salary");
        let aliased = ColumnSelection::aliased(AggregateOp::Min, "salary", "min");
        assert_eq!(aliased.output_key(), "min");
    }
}
