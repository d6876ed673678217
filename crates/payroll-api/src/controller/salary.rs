use crate::controller::SharedStore;
use mem_db::{
    AggregateOp, AggregateValue, ColumnDef, ColumnSelection, ColumnType, Condition, DeleteOutcome,
    InsertOutcome, Row, StoreResult, Value,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SALARY_TABLE: &str = "salary_records";

/// A salary record as submitted by clients; the store assigns the id.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewSalaryRecord {
    pub name: String,
    pub salary: String,
    pub currency: String,
    pub department: String,
    pub sub_department: String,
    #[serde(default)]
    pub on_contract: Option<bool>,
}

impl NewSalaryRecord {
    fn to_row(&self) -> Row {
        let mut row = Row::new();
        row.insert("name".into(), Value::from(self.name.clone()));
        row.insert("salary".into(), Value::from(self.salary.clone()));
        row.insert("currency".into(), Value::from(self.currency.clone()));
        row.insert("department".into(), Value::from(self.department.clone()));
        row.insert(
            "sub_department".into(),
            Value::from(self.sub_department.clone()),
        );
        if let Some(on_contract) = self.on_contract {
            row.insert("on_contract".into(), Value::from(on_contract));
        }
        row
    }
}

/// Salary statistics over a filtered row set, coerced from the
/// decimal-as-string `salary` column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl SummaryStatistics {
    /// Returned whenever the filtered set is empty, instead of
    /// propagating the store's infinity seeds.
    pub const ZERO: Self = Self {
        min: 0.0,
        max: 0.0,
        mean: 0.0,
    };
}

/// Domain logic for salary records: CRUD, summary statistics, and the
/// nested department/sub-department grouping built from repeated
/// aggregate queries.
///
/// Every grouped query is a full scan of the filtered predicate, so
/// the nested grouping costs O(departments x sub_departments) scans.
/// Fine for a small in-memory table; this is the scaling ceiling.
pub struct SalaryController {
    store: SharedStore,
}

impl SalaryController {
    /// Creates the salary table before any query is legal.
    pub async fn new(store: SharedStore) -> Self {
        store.write().await.create_table(
            SALARY_TABLE,
            vec![
                ColumnDef::optional("id", ColumnType::Text),
                ColumnDef::required("name", ColumnType::Text),
                ColumnDef::required("salary", ColumnType::Text),
                ColumnDef::required("currency", ColumnType::Text),
                ColumnDef::required("department", ColumnType::Text),
                ColumnDef::required("sub_department", ColumnType::Text),
                ColumnDef::optional("on_contract", ColumnType::Boolean),
            ],
        );
        Self { store }
    }

    pub async fn add_new_record(&self, record: &NewSalaryRecord) -> StoreResult<InsertOutcome> {
        self.store
            .write()
            .await
            .insert(SALARY_TABLE, &record.to_row())
    }

    pub async fn get_all(&self) -> StoreResult<Vec<Row>> {
        self.store.read().await.select_many(
            SALARY_TABLE,
            &[
                "id",
                "name",
                "salary",
                "currency",
                "department",
                "sub_department",
                "on_contract",
            ],
            &[],
        )
    }

    pub async fn delete_by_id(&self, id: &str) -> StoreResult<DeleteOutcome> {
        self.store.write().await.delete(SALARY_TABLE, id)
    }

    /// Distinct department names, in order of first appearance.
    pub async fn get_departments(&self) -> StoreResult<Vec<String>> {
        let result = self.store.read().await.aggregate(
            SALARY_TABLE,
            &[ColumnSelection::aliased(
                AggregateOp::Distinct,
                "department",
                "department",
            )],
            &[Condition::exists("department")],
        )?;
        Ok(distinct_strings(&result, "department"))
    }

    pub async fn get_summary_statistics(&self) -> StoreResult<SummaryStatistics> {
        self.summary_for(&[]).await
    }

    pub async fn get_summary_statistics_for_on_contract(&self) -> StoreResult<SummaryStatistics> {
        self.summary_for(&[Condition::exists("on_contract")]).await
    }

    /// One entry per distinct department, in discovery order, each
    /// holding the statistics over that department's rows alone.
    pub async fn get_summary_statistics_for_all_departments(
        &self,
    ) -> StoreResult<Vec<(String, SummaryStatistics)>> {
        let mut by_department = Vec::new();
        for department in self.get_departments().await? {
            let stats = self
                .summary_for(&[Condition::equals("department", department.clone())])
                .await?;
            by_department.push((department, stats));
        }
        Ok(by_department)
    }

    /// Two-level grouping: per department, discover its distinct
    /// sub-departments, then compute statistics per
    /// (department, sub_department) pair.
    pub async fn get_summary_statistics_for_all_sub_departments(
        &self,
    ) -> StoreResult<Vec<(String, Vec<(String, SummaryStatistics)>)>> {
        let mut by_department = Vec::new();
        for department in self.get_departments().await? {
            let result = self.store.read().await.aggregate(
                SALARY_TABLE,
                &[ColumnSelection::aliased(
                    AggregateOp::Distinct,
                    "sub_department",
                    "sub_department",
                )],
                &[Condition::equals("department", department.clone())],
            )?;
            let mut by_sub_department = Vec::new();
            for sub_department in distinct_strings(&result, "sub_department") {
                let stats = self
                    .summary_for(&[
                        Condition::equals("department", department.clone()),
                        Condition::equals("sub_department", sub_department.clone()),
                    ])
                    .await?;
                by_sub_department.push((sub_department, stats));
            }
            by_department.push((department, by_sub_department));
        }
        Ok(by_department)
    }

    /// min/max/mean of `salary` over the filtered rows. The query also
    /// selects a row count; a zero count maps to all-zero statistics
    /// rather than the store's infinity seeds.
    async fn summary_for(&self, conditions: &[Condition]) -> StoreResult<SummaryStatistics> {
        let result = self.store.read().await.aggregate(
            SALARY_TABLE,
            &[
                ColumnSelection::aliased(AggregateOp::Min, "salary", "min"),
                ColumnSelection::aliased(AggregateOp::Max, "salary", "max"),
                ColumnSelection::aliased(AggregateOp::Average, "salary", "mean"),
                ColumnSelection::aliased(AggregateOp::Count, "salary", "count"),
            ],
            conditions,
        )?;
        let count = result
            .get("count")
            .and_then(AggregateValue::as_count)
            .unwrap_or(0);
        if count == 0 {
            return Ok(SummaryStatistics::ZERO);
        }
        let field = |key: &str| result.get(key).and_then(AggregateValue::as_f64).unwrap_or(0.0);
        Ok(SummaryStatistics {
            min: field("min"),
            max: field("max"),
            mean: field("mean"),
        })
    }
}

fn distinct_strings(result: &BTreeMap<String, AggregateValue>, key: &str) -> Vec<String> {
    result
        .get(key)
        .and_then(AggregateValue::as_values)
        .map(|values| {
            values
                .iter()
                .filter_map(|value| value.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}
