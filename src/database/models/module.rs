use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A feature module row. `agent_id` is `None` for tenant-wide rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ModuleRow {
    pub module_key: String,
    pub enabled: bool,
    pub agent_id: Option<String>,
}

impl ModuleRow {
    pub fn tenant_wide(module_key: impl Into<String>, enabled: bool) -> Self {
        Self { module_key: module_key.into(), enabled, agent_id: None }
    }

    pub fn for_agent(module_key: impl Into<String>, enabled: bool, agent_id: impl Into<String>) -> Self {
        Self { module_key: module_key.into(), enabled, agent_id: Some(agent_id.into()) }
    }
}
