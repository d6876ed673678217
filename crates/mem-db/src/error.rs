use std::fmt;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("table not found: {0}")]
    TableNotFound(String),
    #[error("invalid data: {}", format_violations(.0))]
    InvalidData(Vec<ColumnViolation>),
}

/// One schema violation on one column of an inserted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnViolation {
    pub column: String,
    pub reason: ViolationReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationReason {
    /// A non-optional column was absent.
    Missing,
    /// The value did not match the declared column type.
    WrongType(&'static str),
    /// A date-typed column held text that does not parse as a date.
    NotAValidDate,
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::WrongType(expected) => write!(f, "not a {expected}"),
            Self::NotAValidDate => write!(f, "not a valid date"),
        }
    }
}

fn format_violations(violations: &[ColumnViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} {}", v.column, v.reason))
        .collect::<Vec<_>>()
        .join(", ")
}
