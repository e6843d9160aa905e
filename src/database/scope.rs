use serde_json::{Map, Value};

use crate::context::AgentContext;
use crate::database::Resource;

/// Columns a request body may never set.
pub const SCOPE_COLUMNS: &[&str] = &["id", "tenant_id", "agent_id", "created_at"];

/// Tenant (and, for agent-owned data, agent) filter for one resource.
///
/// Only constructible from a resolved [`AgentContext`], so every accessor call
/// carries the ids of the request that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    resource: Resource,
    tenant_id: String,
    agent_id: Option<String>,
}

impl Scope {
    pub fn new(ctx: &AgentContext, resource: Resource) -> Self {
        Self {
            resource,
            tenant_id: ctx.tenant_id().to_string(),
            agent_id: resource.agent_owned().then(|| ctx.agent_id.clone()),
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn agent_id(&self) -> Option<&str> {
        self.agent_id.as_deref()
    }

    /// Equality predicates every statement for this scope must include.
    pub fn conditions(&self) -> Vec<(&'static str, &str)> {
        let mut conditions = vec![("tenant_id", self.tenant_id.as_str())];
        if let Some(agent_id) = &self.agent_id {
            conditions.push(("agent_id", agent_id.as_str()));
        }
        conditions
    }

    fn stamp(&self, row: &mut Map<String, Value>) {
        row.insert("tenant_id".into(), Value::String(self.tenant_id.clone()));
        if let Some(agent_id) = &self.agent_id {
            row.insert("agent_id".into(), Value::String(agent_id.clone()));
        }
    }
}

fn strip_scope_columns(mut row: Map<String, Value>) -> Map<String, Value> {
    for column in SCOPE_COLUMNS {
        row.remove(*column);
    }
    row
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScopedQuery {
    scope: Scope,
    filters: Vec<(String, Value)>,
    limit: Option<i64>,
}

impl ScopedQuery {
    pub fn new(scope: Scope) -> Self {
        Self { scope, filters: vec![], limit: None }
    }

    /// Narrow the scope further; extra filters can never widen it.
    pub fn filter_eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((column.into(), value.into()));
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn filters(&self) -> &[(String, Value)] {
        &self.filters
    }

    pub fn limit_value(&self) -> Option<i64> {
        self.limit
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScopedInsert {
    scope: Scope,
    row: Map<String, Value>,
}

impl ScopedInsert {
    /// Drops any scope columns from `row` and stamps the scope's own ids.
    pub fn new(scope: Scope, row: Map<String, Value>) -> Self {
        let mut row = strip_scope_columns(row);
        scope.stamp(&mut row);
        Self { scope, row }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn row(&self) -> &Map<String, Value> {
        &self.row
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScopedUpdate {
    scope: Scope,
    id: String,
    changes: Map<String, Value>,
}

impl ScopedUpdate {
    pub fn new(scope: Scope, id: impl Into<String>, changes: Map<String, Value>) -> Self {
        Self { scope, id: id.into(), changes: strip_scope_columns(changes) }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn changes(&self) -> &Map<String, Value> {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
