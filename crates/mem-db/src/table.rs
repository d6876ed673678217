use crate::condition::{matches_all, Condition};
use crate::error::{StoreError, StoreResult};
use crate::schema::{validate_row, ColumnDef};
use crate::values::{Row, Value};

/// A single table: typed column definitions plus rows in insertion
/// order. Every stored row satisfied the schema at insert time; there
/// are no schema changes after creation.
#[derive(Debug)]
pub struct Table {
    name: String,
    columns: Vec<ColumnDef>,
    rows: Vec<Row>,
    /// Monotonic id source. Never decremented by deletion, so
    /// delete-then-insert cannot reuse an id.
    next_id: u64,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
            next_id: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Validate and append a row, assigning the synthetic `id`.
    ///
    /// The caller's fields are copied into a fresh row, so later
    /// mutation of the input cannot affect stored data. The synthetic
    /// id always wins over a caller-supplied `id` field. Returns the
    /// assigned id.
    pub fn insert(&mut self, fields: &Row) -> StoreResult<String> {
        let violations = validate_row(&self.columns, fields);
        if !violations.is_empty() {
            return Err(StoreError::InvalidData(violations));
        }
        let id = self.next_id.to_string();
        self.next_id += 1;
        let mut row = fields.clone();
        row.insert("id".to_string(), Value::Text(id.clone()));
        self.rows.push(row);
        Ok(id)
    }

    /// Remove the first row whose `id` equals the given id (string
    /// equality). Returns the number of rows removed: 0 or 1, never an
    /// error on a miss.
    pub fn delete_by_id(&mut self, id: &str) -> usize {
        let position = self
            .rows
            .iter()
            .position(|row| row.get("id").and_then(Value::as_str) == Some(id));
        match position {
            Some(index) => {
                self.rows.remove(index);
                1
            }
            None => 0,
        }
    }

    /// Rows passing the conjunction of conditions, in insertion order.
    pub fn filtered(&self, conditions: &[Condition]) -> Vec<&Row> {
        self.rows
            .iter()
            .filter(|row| matches_all(conditions, row))
            .collect()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;
    use crate::schema::ColumnType;

    fn users_table() -> Table {
        Table::new(
            "users",
            vec![
                ColumnDef::required("name", ColumnType::Text),
                ColumnDef::optional("admin", ColumnType::Boolean),
            ],
        )
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let mut table = users_table();
        assert_eq!(table.insert(&row! { "name" => "Alice" }).unwrap(), "0");
        assert_eq!(table.insert(&row! { "name" => "Bob" }).unwrap(), "1");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn insert_rejects_invalid_rows() {
        let mut table = users_table();
        let err = table.insert(&row! { "admin" => true }).unwrap_err();
        assert!(matches!(err, StoreError::InvalidData(ref v) if v.len() == 1));
        assert!(table.is_empty());
    }

    #[test]
    fn insert_copies_fields() {
        let mut table = users_table();
        let mut fields = row! { "name" => "Alice" };
        table.insert(&fields).unwrap();

        // Mutating the caller's map must not affect the stored row.
        fields.insert("name".into(), Value::from("Mallory"));
        assert_eq!(table.rows()[0].get("name"), Some(&Value::from("Alice")));
    }

    #[test]
    fn synthetic_id_wins_over_caller_id() {
        let mut table = users_table();
        let id = table
            .insert(&row! { "name" => "Alice", "id" => "999" })
            .unwrap();
        assert_eq!(id, "0");
        assert_eq!(table.rows()[0].get("id"), Some(&Value::from("0")));
    }

    #[test]
    fn ids_survive_deletion() {
        let mut table = users_table();
        table.insert(&row! { "name" => "Alice" }).unwrap();
        table.insert(&row! { "name" => "Bob" }).unwrap();
        assert_eq!(table.delete_by_id("1"), 1);

        // A new insert must not reuse the deleted id.
        let id = table.insert(&row! { "name" => "Carol" }).unwrap();
        assert_eq!(id, "2");
    }

    #[test]
    fn delete_miss_reports_zero() {
        let mut table = users_table();
        table.insert(&row! { "name" => "Alice" }).unwrap();
        assert_eq!(table.delete_by_id("nonexistent"), 0);
        assert_eq!(table.delete_by_id(""), 0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn filtered_preserves_insertion_order() {
        let mut table = users_table();
        table.insert(&row! { "name" => "Alice", "admin" => true }).unwrap();
        table.insert(&row! { "name" => "Bob" }).unwrap();
        table.insert(&row! { "name" => "Carol", "admin" => true }).unwrap();

        let admins = table.filtered(&[Condition::exists("admin")]);
        let names: Vec<&str> = admins
            .iter()
            .filter_map(|row| row.get("name")?.as_str())
            .collect();
        assert_eq!(names, vec!["Alice", "Carol"]);
    }
}
