//! Inert stores handed out in build-safe mode when the store is not
//! configured. Reads see an empty store; writes fail with
//! [`DatabaseError::Unconfigured`].

use async_trait::async_trait;
use serde_json::Value;

use crate::database::accessor::DataAccessor;
use crate::database::error::DatabaseError;
use crate::database::identity::IdentityStore;
use crate::database::models::{Agent, ModuleRow, Tenant};
use crate::database::scope::{ScopedInsert, ScopedQuery, ScopedUpdate};

#[derive(Debug, Default)]
pub struct NullAccessor;

#[async_trait]
impl DataAccessor for NullAccessor {
    async fn select(&self, _query: &ScopedQuery) -> Result<Vec<Value>, DatabaseError> {
        Ok(vec![])
    }

    async fn insert(&self, _insert: &ScopedInsert) -> Result<Value, DatabaseError> {
        Err(DatabaseError::Unconfigured)
    }

    async fn update(&self, _update: &ScopedUpdate) -> Result<Option<Value>, DatabaseError> {
        Err(DatabaseError::Unconfigured)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Err(DatabaseError::Unconfigured)
    }

    fn is_inert(&self) -> bool {
        true
    }
}

#[derive(Debug, Default)]
pub struct NullIdentityStore;

#[async_trait]
impl IdentityStore for NullIdentityStore {
    async fn tenant_by_domain(&self, _domain: &str) -> Result<Option<Tenant>, DatabaseError> {
        Ok(None)
    }

    async fn agent(&self, _tenant_id: &str, _agent_id: &str) -> Result<Option<Agent>, DatabaseError> {
        Ok(None)
    }

    async fn modules(&self, _tenant_id: &str, _agent_id: &str) -> Result<Vec<ModuleRow>, DatabaseError> {
        Ok(vec![])
    }
}
