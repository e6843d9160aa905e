use serde_json::{Map, Value};

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterOrderInfo, FilterWhereInfo, SortDirection, SqlResult};

/// SQL builder for single-table reads and writes.
///
/// Rows travel as JSON: reads come back through `row_to_json`, writes go in
/// through `jsonb_populate_record` so the table decides the column types.
pub struct Filter {
    table_name: String,
    conditions: Vec<FilterWhereInfo>,
    order_data: Vec<FilterOrderInfo>,
    limit: Option<i64>,
}

impl Filter {
    pub fn new(table_name: impl Into<String>) -> Result<Self, FilterError> {
        let table_name = table_name.into();
        Self::validate_table_name(&table_name)?;
        Ok(Self {
            table_name,
            conditions: vec![],
            order_data: vec![],
            limit: None,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn where_eq(&mut self, column: &str, value: Value) -> Result<&mut Self, FilterError> {
        Self::validate_column(column)?;
        self.conditions.push(FilterWhereInfo { column: column.to_string(), data: value });
        Ok(self)
    }

    pub fn order(&mut self, column: &str, sort: SortDirection) -> Result<&mut Self, FilterError> {
        Self::validate_column(column)?;
        self.order_data.push(FilterOrderInfo { column: column.to_string(), sort });
        Ok(self)
    }

    pub fn limit(&mut self, limit: i64) -> Result<&mut Self, FilterError> {
        if limit < 1 {
            return Err(FilterError::InvalidLimit(limit));
        }
        self.limit = Some(limit);
        Ok(self)
    }

    pub fn conditions(&self) -> &[FilterWhereInfo] {
        &self.conditions
    }

    /// `SELECT row_to_json(t) AS row FROM (SELECT * FROM .. WHERE .. ORDER BY .. LIMIT ..) t`
    pub fn to_select_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(&self.conditions, 0, None);
        let order_clause = FilterOrder::generate(&self.order_data);
        let limit_clause = self.limit.map(|l| format!("LIMIT {}", l)).unwrap_or_default();

        let inner = [
            "SELECT *".to_string(),
            format!("FROM \"{}\"", self.table_name),
            format!("WHERE {}", where_clause),
            order_clause,
            limit_clause,
        ].into_iter().filter(|s| !s.is_empty()).collect::<Vec<_>>().join(" ");

        SqlResult {
            query: format!("SELECT row_to_json(t) AS row FROM ({}) t", inner),
            params,
        }
    }

    /// Insert one row; the row object is bound as `$1`. Conditions are ignored.
    pub fn to_insert_sql(&self, row: &Map<String, Value>) -> Result<SqlResult, FilterError> {
        let columns = Self::quoted_columns(row, "insert")?;
        let query = format!(
            "WITH inserted AS (INSERT INTO \"{table}\" ({cols}) SELECT {cols} FROM jsonb_populate_record(NULL::\"{table}\", $1::jsonb) RETURNING *) \
             SELECT row_to_json(inserted) AS row FROM inserted",
            table = self.table_name,
            cols = columns.join(", "),
        );
        Ok(SqlResult { query, params: vec![Value::Object(row.clone())] })
    }

    /// Update the rows matching every condition; changes are bound as `$1`.
    pub fn to_update_sql(&self, changes: &Map<String, Value>) -> Result<SqlResult, FilterError> {
        let columns = Self::quoted_columns(changes, "update")?;
        if self.conditions.is_empty() {
            return Err(FilterError::UnconditionedUpdate);
        }
        let assignments = columns
            .iter()
            .map(|c| format!("{c} = source.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let (where_clause, where_params) = FilterWhere::generate(&self.conditions, 1, Some("target"));
        let query = format!(
            "WITH updated AS (UPDATE \"{table}\" AS target SET {assignments} \
             FROM jsonb_populate_record(NULL::\"{table}\", $1::jsonb) AS source \
             WHERE {where_clause} RETURNING target.*) \
             SELECT row_to_json(updated) AS row FROM updated",
            table = self.table_name,
        );

        let mut params = vec![Value::Object(changes.clone())];
        params.extend(where_params);
        Ok(SqlResult { query, params })
    }

    fn quoted_columns(row: &Map<String, Value>, action: &'static str) -> Result<Vec<String>, FilterError> {
        if row.is_empty() {
            return Err(FilterError::EmptyRow(action));
        }
        let mut columns = Vec::with_capacity(row.len());
        for key in row.keys() {
            Self::validate_column(key)?;
            columns.push(format!("\"{}\"", key));
        }
        Ok(columns)
    }

    fn validate_table_name(name: &str) -> Result<(), FilterError> {
        if !Self::is_identifier(name) {
            return Err(FilterError::InvalidTableName(name.to_string()));
        }
        Ok(())
    }

    fn validate_column(column: &str) -> Result<(), FilterError> {
        if !Self::is_identifier(column) {
            return Err(FilterError::InvalidColumn(column.to_string()));
        }
        Ok(())
    }

    fn is_identifier(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
            _ => return false,
        }
        name.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scoped(table: &str) -> Filter {
        let mut filter = Filter::new(table).unwrap();
        filter.where_eq("tenant_id", json!("t1")).unwrap();
        filter.where_eq("agent_id", json!("a1")).unwrap();
        filter
    }

    #[test]
    fn rejects_bad_identifiers() {
        assert!(Filter::new("bookings; drop table x").is_err());
        assert!(Filter::new("").is_err());
        assert!(Filter::new("1bookings").is_err());
        let mut filter = Filter::new("bookings").unwrap();
        assert!(filter.where_eq("status\" OR 1=1 --", json!("x")).is_err());
    }

    #[test]
    fn select_is_scoped_ordered_and_limited() {
        let mut filter = scoped("bookings");
        filter.order("created_at", SortDirection::Desc).unwrap();
        filter.limit(25).unwrap();
        let sql = filter.to_select_sql();
        assert_eq!(
            sql.query,
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM \"bookings\" WHERE \"tenant_id\"::text = $1 AND \"agent_id\"::text = $2 ORDER BY \"created_at\" DESC LIMIT 25) t"
        );
        assert_eq!(sql.params, vec![json!("t1"), json!("a1")]);
    }

    #[test]
    fn insert_binds_row_as_json() {
        let filter = Filter::new("leads").unwrap();
        let row = json!({"full_name": "Aisha", "tenant_id": "t1"});
        let sql = filter.to_insert_sql(row.as_object().unwrap()).unwrap();
        assert!(sql.query.starts_with("WITH inserted AS (INSERT INTO \"leads\" (\"full_name\", \"tenant_id\")"));
        assert!(sql.query.contains("jsonb_populate_record(NULL::\"leads\", $1::jsonb)"));
        assert_eq!(sql.params, vec![row]);
    }

    #[test]
    fn update_places_scope_after_changes() {
        let mut filter = Filter::new("transport_bookings").unwrap();
        filter.where_eq("id", json!("tb-9")).unwrap();
        filter.where_eq("tenant_id", json!("t1")).unwrap();
        filter.where_eq("agent_id", json!("a1")).unwrap();
        let changes = json!({"status": "confirmed"});
        let sql = filter.to_update_sql(changes.as_object().unwrap()).unwrap();
        assert!(sql.query.contains("SET \"status\" = source.\"status\""));
        assert!(sql.query.contains(
            "WHERE target.\"id\"::text = $2 AND target.\"tenant_id\"::text = $3 AND target.\"agent_id\"::text = $4"
        ));
        assert_eq!(sql.params, vec![changes, json!("tb-9"), json!("t1"), json!("a1")]);
    }

    #[test]
    fn update_without_conditions_is_refused() {
        let filter = Filter::new("leads").unwrap();
        let changes = json!({"status": "lost"});
        assert!(matches!(
            filter.to_update_sql(changes.as_object().unwrap()),
            Err(FilterError::UnconditionedUpdate)
        ));
        assert!(matches!(filter.to_update_sql(&Map::new()), Err(FilterError::EmptyRow("update"))));
    }
}
