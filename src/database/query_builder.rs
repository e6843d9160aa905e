use serde_json::Value;
use sqlx::{self, postgres::PgArguments, PgPool, Row};

use crate::database::error::DatabaseError;
use crate::database::scope::{Scope, ScopedInsert, ScopedQuery, ScopedUpdate};
use crate::filter::types::SqlResult;
use crate::filter::Filter;

/// Turns scoped operations into SQL. The scope predicates always come first.
pub struct QueryBuilder;

impl QueryBuilder {
    fn scoped_filter(scope: &Scope) -> Result<Filter, DatabaseError> {
        let mut filter = Filter::new(scope.resource().table())?;
        for (column, value) in scope.conditions() {
            filter.where_eq(column, Value::String(value.to_string()))?;
        }
        Ok(filter)
    }

    pub fn select(query: &ScopedQuery) -> Result<SqlResult, DatabaseError> {
        let mut filter = Self::scoped_filter(query.scope())?;
        for (column, value) in query.filters() {
            filter.where_eq(column, value.clone())?;
        }
        let (column, sort) = query.scope().resource().ordering();
        filter.order(column, sort)?;
        if let Some(limit) = query.limit_value() {
            filter.limit(limit)?;
        }
        Ok(filter.to_select_sql())
    }

    pub fn insert(insert: &ScopedInsert) -> Result<SqlResult, DatabaseError> {
        let filter = Filter::new(insert.scope().resource().table())?;
        Ok(filter.to_insert_sql(insert.row())?)
    }

    pub fn update(update: &ScopedUpdate) -> Result<SqlResult, DatabaseError> {
        let mut filter = Filter::new(update.scope().resource().table())?;
        filter.where_eq("id", Value::String(update.id().to_string()))?;
        for (column, value) in update.scope().conditions() {
            filter.where_eq(column, Value::String(value.to_string()))?;
        }
        Ok(filter.to_update_sql(update.changes())?)
    }

    pub async fn fetch_rows(pool: &PgPool, sql: &SqlResult) -> Result<Vec<Value>, DatabaseError> {
        let mut q = sqlx::query(&sql.query);
        for p in sql.params.iter() {
            q = bind_param_query(q, p);
        }
        let rows = q.fetch_all(pool).await?;
        rows.iter()
            .map(|row| row.try_get::<Value, _>("row").map_err(DatabaseError::from))
            .collect()
    }

    pub async fn fetch_optional_row(pool: &PgPool, sql: &SqlResult) -> Result<Option<Value>, DatabaseError> {
        let mut q = sqlx::query(&sql.query);
        for p in sql.params.iter() {
            q = bind_param_query(q, p);
        }
        match q.fetch_optional(pool).await? {
            Some(row) => Ok(Some(row.try_get::<Value, _>("row")?)),
            None => Ok(None),
        }
    }
}

// Predicates compare against `::text`, so scalars bind as text and row
// payloads bind as JSONB.
fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::String(s) => q.bind(s.as_str()),
        Value::Bool(b) => q.bind(b.to_string()),
        Value::Number(n) => q.bind(n.to_string()),
        Value::Array(_) | Value::Object(_) => q.bind(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Resource;
    use crate::testing::agent_context;
    use serde_json::json;

    #[test]
    fn select_leads_with_scope_then_filters() {
        let ctx = agent_context("t1", "a1", &[]);
        let query = ScopedQuery::new(Scope::new(&ctx, Resource::Leads))
            .filter_eq("status", "new")
            .limit(10);
        let sql = QueryBuilder::select(&query).unwrap();
        assert!(sql.query.contains(
            "WHERE \"tenant_id\"::text = $1 AND \"agent_id\"::text = $2 AND \"status\"::text = $3 ORDER BY \"created_at\" DESC LIMIT 10"
        ));
        assert_eq!(sql.params, vec![json!("t1"), json!("a1"), json!("new")]);
    }

    #[test]
    fn training_is_tenant_wide() {
        let ctx = agent_context("t1", "a1", &[]);
        let sql = QueryBuilder::select(&ScopedQuery::new(Scope::new(&ctx, Resource::TrainingModules))).unwrap();
        assert!(sql.query.contains("FROM \"training_modules\" WHERE \"tenant_id\"::text = $1 ORDER BY \"position\" ASC"));
        assert!(!sql.query.contains("agent_id"));
    }

    #[test]
    fn update_matches_id_tenant_and_agent() {
        let ctx = agent_context("t1", "a1", &[]);
        let changes = json!({"status": "confirmed"}).as_object().unwrap().clone();
        let update = ScopedUpdate::new(Scope::new(&ctx, Resource::TransportBookings), "tb-7", changes);
        let sql = QueryBuilder::update(&update).unwrap();
        assert!(sql.query.contains("UPDATE \"transport_bookings\" AS target"));
        assert_eq!(sql.params[1..], [json!("tb-7"), json!("t1"), json!("a1")]);
    }

    #[test]
    fn bad_filter_column_is_a_query_error() {
        let ctx = agent_context("t1", "a1", &[]);
        let query = ScopedQuery::new(Scope::new(&ctx, Resource::Bookings)).filter_eq("x;drop", "1");
        assert!(matches!(QueryBuilder::select(&query), Err(DatabaseError::QueryError(_))));
    }
}
