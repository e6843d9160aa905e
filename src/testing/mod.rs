//! In-memory stand-ins for the store seams, used by unit and integration tests.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Mutex;
use uuid::Uuid;

use crate::context::{AgentContext, AgentProfile, AgentRole, ModuleFlag, TenantContext};
use crate::database::models::{Agent, ModuleRow, Tenant};
use crate::database::{DataAccessor, DatabaseError, IdentityStore, ScopedInsert, ScopedQuery, ScopedUpdate};
use crate::types::Operation;

/// Agent context with role `agent` and the given module flags.
pub fn agent_context(tenant_id: &str, agent_id: &str, modules: &[(&str, bool)]) -> AgentContext {
    AgentContext {
        tenant: TenantContext {
            tenant_id: tenant_id.to_string(),
            domain: format!("{}.portal.test", tenant_id),
            name: format!("Tenant {}", tenant_id),
        },
        agent_id: agent_id.to_string(),
        agent_role: AgentRole::Agent,
        agent: AgentProfile {
            full_name: format!("Agent {}", agent_id),
            email: None,
        },
        modules: modules.iter().map(|(k, enabled)| ModuleFlag::new(*k, *enabled)).collect(),
    }
}

/// One call received by [`SpyAccessor`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Select(ScopedQuery),
    Insert(ScopedInsert),
    Update(ScopedUpdate),
}

impl RecordedCall {
    pub fn operation(&self) -> Operation {
        match self {
            RecordedCall::Select(_) => Operation::Select,
            RecordedCall::Insert(_) => Operation::Insert,
            RecordedCall::Update(_) => Operation::Update,
        }
    }

    /// `(tenant_id, agent_id)` the call was scoped to.
    pub fn scope_ids(&self) -> (String, Option<String>) {
        let scope = match self {
            RecordedCall::Select(q) => q.scope(),
            RecordedCall::Insert(i) => i.scope(),
            RecordedCall::Update(u) => u.scope(),
        };
        (scope.tenant_id().to_string(), scope.agent_id().map(str::to_string))
    }
}

/// Records every call and answers from canned rows.
#[derive(Debug, Default)]
pub struct SpyAccessor {
    calls: Mutex<Vec<RecordedCall>>,
    rows: Vec<Value>,
    backend_error: Option<String>,
    missing_updates: bool,
}

impl SpyAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows returned by every select.
    pub fn with_rows(mut self, rows: Vec<Value>) -> Self {
        self.rows = rows;
        self
    }

    /// Every call fails as if the store rejected the query.
    pub fn with_backend_error(mut self, message: impl Into<String>) -> Self {
        self.backend_error = Some(message.into());
        self
    }

    /// Updates match no row.
    pub fn with_missing_updates(mut self) -> Self {
        self.missing_updates = true;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn count(&self, operation: Operation) -> usize {
        self.calls().iter().filter(|c| c.operation() == operation).count()
    }

    pub fn mutation_count(&self) -> usize {
        self.calls().iter().filter(|c| c.operation().is_mutation()).count()
    }

    fn record(&self, call: RecordedCall) -> Result<(), DatabaseError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        match &self.backend_error {
            Some(message) => Err(DatabaseError::QueryError(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DataAccessor for SpyAccessor {
    async fn select(&self, query: &ScopedQuery) -> Result<Vec<Value>, DatabaseError> {
        self.record(RecordedCall::Select(query.clone()))?;
        let limit = query.limit_value().map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(self.rows.iter().take(limit).cloned().collect())
    }

    async fn insert(&self, insert: &ScopedInsert) -> Result<Value, DatabaseError> {
        self.record(RecordedCall::Insert(insert.clone()))?;
        let mut row = insert.row().clone();
        row.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
        Ok(Value::Object(row))
    }

    async fn update(&self, update: &ScopedUpdate) -> Result<Option<Value>, DatabaseError> {
        self.record(RecordedCall::Update(update.clone()))?;
        if self.missing_updates {
            return Ok(None);
        }
        let mut row: Map<String, Value> = update.changes().clone();
        row.insert("id".into(), Value::String(update.id().to_string()));
        row.insert("tenant_id".into(), Value::String(update.scope().tenant_id().to_string()));
        if let Some(agent_id) = update.scope().agent_id() {
            row.insert("agent_id".into(), Value::String(agent_id.to_string()));
        }
        Ok(Some(Value::Object(row)))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        match &self.backend_error {
            Some(message) => Err(DatabaseError::QueryError(message.clone())),
            None => Ok(()),
        }
    }
}

/// Fixed tenants, agents and module rows.
#[derive(Debug, Default, Clone)]
pub struct StaticIdentityStore {
    tenants: Vec<Tenant>,
    agents: Vec<Agent>,
    modules: Vec<(String, ModuleRow)>,
}

impl StaticIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tenant(mut self, id: &str, name: &str, domain: &str) -> Self {
        self.tenants.push(Tenant {
            id: id.to_string(),
            name: name.to_string(),
            domain: domain.to_string(),
            is_active: true,
        });
        self
    }

    pub fn with_agent(mut self, tenant_id: &str, id: &str, full_name: &str, role: &str) -> Self {
        self.agents.push(Agent {
            id: id.to_string(),
            tenant_id: tenant_id.to_string(),
            full_name: full_name.to_string(),
            email: None,
            role: role.to_string(),
            is_active: true,
        });
        self
    }

    pub fn with_inactive_agent(mut self, tenant_id: &str, id: &str) -> Self {
        self = self.with_agent(tenant_id, id, "Inactive", "agent");
        if let Some(agent) = self.agents.last_mut() {
            agent.is_active = false;
        }
        self
    }

    /// `agent_id: None` adds a tenant-wide row.
    pub fn with_module(mut self, tenant_id: &str, agent_id: Option<&str>, key: &str, enabled: bool) -> Self {
        let row = match agent_id {
            Some(agent_id) => ModuleRow::for_agent(key, enabled, agent_id),
            None => ModuleRow::tenant_wide(key, enabled),
        };
        self.modules.push((tenant_id.to_string(), row));
        self
    }
}

#[async_trait]
impl IdentityStore for StaticIdentityStore {
    async fn tenant_by_domain(&self, domain: &str) -> Result<Option<Tenant>, DatabaseError> {
        Ok(self
            .tenants
            .iter()
            .find(|t| t.is_active && t.domain.eq_ignore_ascii_case(domain))
            .cloned())
    }

    async fn agent(&self, tenant_id: &str, agent_id: &str) -> Result<Option<Agent>, DatabaseError> {
        Ok(self
            .agents
            .iter()
            .find(|a| a.tenant_id == tenant_id && a.id == agent_id)
            .cloned())
    }

    async fn modules(&self, tenant_id: &str, agent_id: &str) -> Result<Vec<ModuleRow>, DatabaseError> {
        Ok(self
            .modules
            .iter()
            .filter(|(t, row)| t == tenant_id && row.agent_id.as_deref().map_or(true, |a| a == agent_id))
            .map(|(_, row)| row.clone())
            .collect())
    }
}
