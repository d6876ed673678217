use crate::error::{ColumnViolation, ViolationReason};
use crate::values::{Row, Value};

/// Declared type of a table column.
///
/// `Date` columns hold text that must parse as a date; the stored
/// value stays textual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Number,
    Boolean,
    Date,
}

impl ColumnType {
    /// Name used in violation messages ("not a <name>").
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            // Date values arrive as text; a non-text value is reported
            // as "not a string", an unparseable one as "not a valid date".
            Self::Date => "string",
        }
    }
}

/// A single column definition within a table schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub column_type: ColumnType,
    pub optional: bool,
}

impl ColumnDef {
    pub fn required(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            optional: false,
        }
    }

    pub fn optional(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            optional: true,
        }
    }
}

/// Validate a row's fields against the table's column definitions.
///
/// Returns every violation, not just the first: a missing non-optional
/// column, a present column whose value does not match its declared
/// type, or a date column whose text does not parse.
pub fn validate_row(columns: &[ColumnDef], row: &Row) -> Vec<ColumnViolation> {
    let mut violations = Vec::new();
    for column in columns {
        match row.get(&column.name) {
            None => {
                if !column.optional {
                    violations.push(ColumnViolation {
                        column: column.name.clone(),
                        reason: ViolationReason::Missing,
                    });
                }
            }
            Some(value) => {
                if let Some(reason) = check_value(value, column.column_type) {
                    violations.push(ColumnViolation {
                        column: column.name.clone(),
                        reason,
                    });
                }
            }
        }
    }
    violations
}

fn check_value(value: &Value, expected: ColumnType) -> Option<ViolationReason> {
    match expected {
        ColumnType::Text => match value {
            Value::Text(_) => None,
            _ => Some(ViolationReason::WrongType("string")),
        },
        ColumnType::Number => match value {
            Value::Number(_) => None,
            _ => Some(ViolationReason::WrongType("number")),
        },
        ColumnType::Boolean => match value {
            Value::Boolean(_) => None,
            _ => Some(ViolationReason::WrongType("boolean")),
        },
        ColumnType::Date => match value {
            Value::Text(s) if parses_as_date(s) => None,
            Value::Text(_) => Some(ViolationReason::NotAValidDate),
            _ => Some(ViolationReason::WrongType("string")),
        },
    }
}

/// Accepts RFC 3339 timestamps, `YYYY-MM-DD`, and
/// `YYYY-MM-DD HH:MM:SS`.
fn parses_as_date(s: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(s).is_ok()
        || chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    fn salary_columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::required("name", ColumnType::Text),
            ColumnDef::required("salary", ColumnType::Text),
            ColumnDef::optional("on_contract", ColumnType::Boolean),
            ColumnDef::optional("joined", ColumnType::Date),
        ]
    }

    #[test]
    fn valid_row_passes() {
        let row = row! { "name" => "Alice", "salary" => "20000" };
        assert!(validate_row(&salary_columns(), &row).is_empty());
    }

    #[test]
    fn missing_required_column_reported() {
        let row = row! { "name" => "Alice" };
        let violations = validate_row(&salary_columns(), &row);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].column, "salary");
        assert_eq!(violations[0].reason, ViolationReason::Missing);
    }

    #[test]
    fn missing_optional_column_allowed() {
        let row = row! { "name" => "Alice", "salary" => "20000" };
        assert!(validate_row(&salary_columns(), &row).is_empty());
    }

    #[test]
    fn wrong_type_reported() {
        let row = row! { "name" => "Alice", "salary" => 20000.0 };
        let violations = validate_row(&salary_columns(), &row);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].reason, ViolationReason::WrongType("string"));
    }

    #[test]
    fn present_optional_column_is_still_typed() {
        let row = row! {
            "name" => "Alice",
            "salary" => "20000",
            "on_contract" => "yes",
        };
        let violations = validate_row(&salary_columns(), &row);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].column, "on_contract");
        assert_eq!(violations[0].reason, ViolationReason::WrongType("boolean"));
    }

    #[test]
    fn every_violation_reported() {
        let row = row! { "salary" => 1.0, "on_contract" => "yes" };
        let violations = validate_row(&salary_columns(), &row);
        let columns: Vec<&str> = violations.iter().map(|v| v.column.as_str()).collect();
        assert_eq!(columns, vec!["name", "salary", "on_contract"]);
    }

    #[test]
    fn date_column_accepts_parseable_dates() {
        let columns = vec![ColumnDef::required("joined", ColumnType::Date)];
        for ok in ["2024-01-15", "2024-01-15 08:30:00", "2024-01-15T08:30:00Z"] {
            let row = row! { "joined" => ok };
            assert!(validate_row(&columns, &row).is_empty(), "{ok}");
        }
    }

    #[test]
    fn date_column_rejects_garbage() {
        let columns = vec![ColumnDef::required("joined", ColumnType::Date)];

        let row = row! { "joined" => "not-a-date" };
        let violations = validate_row(&columns, &row);
        assert_eq!(violations[0].reason, ViolationReason::NotAValidDate);

        // A non-text value on a date column is a type error, not a parse error.
        let row = row! { "joined" => 1700000000.0 };
        let violations = validate_row(&columns, &row);
        assert_eq!(violations[0].reason, ViolationReason::WrongType("string"));
    }
}
