use serde_json::Value;

use super::types::FilterWhereInfo;

/// Renders equality predicates as a parameterized conjunction.
///
/// Columns are compared through `::text` so ids bind the same way whether the
/// column is `uuid`, `text` or `bigint`.
pub struct FilterWhere {
    param_values: Vec<Value>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    pub fn generate(
        conditions: &[FilterWhereInfo],
        starting_param_index: usize,
        qualifier: Option<&str>,
    ) -> (String, Vec<Value>) {
        let mut filter_where = Self::new(starting_param_index);
        let mut sql_conditions = Vec::with_capacity(conditions.len());
        for condition in conditions {
            sql_conditions.push(filter_where.build_sql_condition(condition, qualifier));
        }
        let where_clause = if sql_conditions.is_empty() { "1=1".to_string() } else { sql_conditions.join(" AND ") };
        (where_clause, filter_where.param_values)
    }

    fn build_sql_condition(&mut self, condition: &FilterWhereInfo, qualifier: Option<&str>) -> String {
        let quoted_column = match qualifier {
            Some(q) => format!("{}.\"{}\"", q, condition.column),
            None => format!("\"{}\"", condition.column),
        };
        if condition.data.is_null() {
            format!("{} IS NULL", quoted_column)
        } else {
            format!("{}::text = {}", quoted_column, self.param(condition.data.clone()))
        }
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_params_from_offset() {
        let conditions = vec![
            FilterWhereInfo { column: "tenant_id".into(), data: json!("t1") },
            FilterWhereInfo { column: "agent_id".into(), data: json!("a1") },
        ];
        let (sql, params) = FilterWhere::generate(&conditions, 1, Some("target"));
        assert_eq!(sql, "target.\"tenant_id\"::text = $2 AND target.\"agent_id\"::text = $3");
        assert_eq!(params, vec![json!("t1"), json!("a1")]);
    }

    #[test]
    fn null_renders_is_null() {
        let conditions = vec![FilterWhereInfo { column: "archived_at".into(), data: Value::Null }];
        let (sql, params) = FilterWhere::generate(&conditions, 0, None);
        assert_eq!(sql, "\"archived_at\" IS NULL");
        assert!(params.is_empty());
    }
}
