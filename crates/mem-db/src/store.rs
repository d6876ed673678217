use crate::aggregate::{reduce, AggregateValue, ColumnSelection};
use crate::condition::Condition;
use crate::error::{StoreError, StoreResult};
use crate::schema::ColumnDef;
use crate::table::Table;
use crate::values::{Row, TableName};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Result of an insert: the synthetic id assigned to the new row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub inserted_id: String,
}

/// Result of a delete: how many rows were removed (0 or 1). A miss is
/// an ordinary outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub deleted_records: usize,
}

/// The top-level in-memory store holding multiple schema-validated
/// tables. The single shared mutable resource of the system; callers
/// that need cross-thread access wrap it in a lock.
#[derive(Debug, Default)]
pub struct Store {
    tables: HashMap<TableName, Table>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table with an empty row sequence. Overwrites any
    /// existing table of the same name (idempotent creation).
    pub fn create_table(&mut self, name: &str, columns: Vec<ColumnDef>) {
        self.tables
            .insert(name.to_owned(), Table::new(name, columns));
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    fn table(&self, name: &str) -> StoreResult<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_owned()))
    }

    fn table_mut(&mut self, name: &str) -> StoreResult<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| StoreError::TableNotFound(name.to_owned()))
    }

    /// Validate and insert a row, returning the assigned id.
    pub fn insert(&mut self, table: &str, fields: &Row) -> StoreResult<InsertOutcome> {
        let inserted_id = self.table_mut(table)?.insert(fields)?;
        Ok(InsertOutcome { inserted_id })
    }

    /// Delete the first row with the given id; a miss reports 0.
    pub fn delete(&mut self, table: &str, id: &str) -> StoreResult<DeleteOutcome> {
        let deleted_records = self.table_mut(table)?.delete_by_id(id);
        Ok(DeleteOutcome { deleted_records })
    }

    /// Filter rows by the conjunction of conditions, then compute one
    /// reduction per column selection. The result is a single flat
    /// object keyed by each selection's output key.
    pub fn aggregate(
        &self,
        table: &str,
        selections: &[ColumnSelection],
        conditions: &[Condition],
    ) -> StoreResult<BTreeMap<String, AggregateValue>> {
        let rows = self.table(table)?.filtered(conditions);
        let mut result = BTreeMap::new();
        for selection in selections {
            result.insert(selection.output_key().to_owned(), reduce(selection, &rows));
        }
        Ok(result)
    }

    /// Filter rows, then project each survivor onto the requested
    /// column subset, preserving survivor order. Absent columns are
    /// omitted from the projection.
    pub fn select_many(
        &self,
        table: &str,
        columns: &[&str],
        conditions: &[Condition],
    ) -> StoreResult<Vec<Row>> {
        let rows = self.table(table)?.filtered(conditions);
        Ok(rows.iter().map(|row| project(row, columns)).collect())
    }

    /// Like `select_many` but only the first surviving row, or `None`.
    pub fn select_one(
        &self,
        table: &str,
        columns: &[&str],
        conditions: &[Condition],
    ) -> StoreResult<Option<Row>> {
        let rows = self.table(table)?.filtered(conditions);
        Ok(rows.first().map(|row| project(row, columns)))
    }
}

fn project(row: &Row, columns: &[&str]) -> Row {
    let mut projected = Row::new();
    for column in columns {
        if let Some(value) = row.get(*column) {
            projected.insert((*column).to_owned(), value.clone());
        }
    }
    projected
}
