use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;

use crate::database::error::DatabaseError;
use crate::database::query_builder::QueryBuilder;
use crate::database::scope::{ScopedInsert, ScopedQuery, ScopedUpdate};

/// Pass-through to the relational store. Every operation arrives already
/// scoped to the tenant (and agent) of the calling request.
#[async_trait]
pub trait DataAccessor: Send + Sync {
    async fn select(&self, query: &ScopedQuery) -> Result<Vec<Value>, DatabaseError>;

    async fn insert(&self, insert: &ScopedInsert) -> Result<Value, DatabaseError>;

    /// `Ok(None)` when no row in scope has the given id.
    async fn update(&self, update: &ScopedUpdate) -> Result<Option<Value>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;

    /// True for the build-safe stand-in that never reaches a store.
    fn is_inert(&self) -> bool {
        false
    }
}

pub struct PgAccessor {
    pool: PgPool,
}

impl PgAccessor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DataAccessor for PgAccessor {
    async fn select(&self, query: &ScopedQuery) -> Result<Vec<Value>, DatabaseError> {
        let sql = QueryBuilder::select(query)?;
        debug!(table = query.scope().resource().table(), tenant = query.scope().tenant_id(), "select");
        QueryBuilder::fetch_rows(&self.pool, &sql).await
    }

    async fn insert(&self, insert: &ScopedInsert) -> Result<Value, DatabaseError> {
        let sql = QueryBuilder::insert(insert)?;
        debug!(table = insert.scope().resource().table(), tenant = insert.scope().tenant_id(), "insert");
        QueryBuilder::fetch_optional_row(&self.pool, &sql)
            .await?
            .ok_or_else(|| DatabaseError::QueryError("insert returned no row".to_string()))
    }

    async fn update(&self, update: &ScopedUpdate) -> Result<Option<Value>, DatabaseError> {
        let sql = QueryBuilder::update(update)?;
        debug!(
            table = update.scope().resource().table(),
            tenant = update.scope().tenant_id(),
            id = update.id(),
            "update"
        );
        QueryBuilder::fetch_optional_row(&self.pool, &sql).await
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
