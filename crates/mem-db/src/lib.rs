pub mod aggregate;
pub mod condition;
pub mod error;
pub mod schema;
pub mod store;
pub mod table;
pub mod values;

pub use aggregate::{AggregateOp, AggregateValue, ColumnSelection};
pub use condition::Condition;
pub use error::{ColumnViolation, StoreError, StoreResult, ViolationReason};
pub use schema::{ColumnDef, ColumnType};
pub use store::{DeleteOutcome, InsertOutcome, Store};
pub use table::Table;
pub use values::{Row, TableName, Value};
