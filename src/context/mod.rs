//! Request-scoped security context.
//!
//! A [`TenantContext`] is resolved from the host a request arrived on; an
//! [`AgentContext`] adds the authenticated agent and the feature modules
//! enabled for it. Both live only as long as the request that built them.

pub mod resolver;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::database::models::ModuleRow;

pub use resolver::ContextResolver;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantContext {
    pub tenant_id: String,
    pub domain: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Owner,
    Admin,
    Agent,
}

impl AgentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Owner => "owner",
            AgentRole::Admin => "admin",
            AgentRole::Agent => "agent",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, AgentRole::Owner | AgentRole::Admin)
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(AgentRole::Owner),
            "admin" => Ok(AgentRole::Admin),
            "agent" => Ok(AgentRole::Agent),
            other => Err(format!("unknown agent role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentProfile {
    pub full_name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFlag {
    pub module_key: String,
    pub enabled: bool,
}

impl ModuleFlag {
    pub fn new(module_key: impl Into<String>, enabled: bool) -> Self {
        Self { module_key: module_key.into(), enabled }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentContext {
    pub tenant: TenantContext,
    pub agent_id: String,
    pub agent_role: AgentRole,
    pub agent: AgentProfile,
    pub modules: Vec<ModuleFlag>,
}

impl AgentContext {
    pub fn tenant_id(&self) -> &str {
        &self.tenant.tenant_id
    }

    pub fn has_module(&self, module_key: &str) -> bool {
        self.modules.iter().any(|m| m.module_key == module_key && m.enabled)
    }
}

/// Effective modules: tenant-wide rows, overridden key by key by agent rows.
pub fn merge_modules(rows: Vec<ModuleRow>) -> Vec<ModuleFlag> {
    let mut merged: BTreeMap<String, bool> = BTreeMap::new();
    let (agent_rows, tenant_rows): (Vec<_>, Vec<_>) = rows.into_iter().partition(|r| r.agent_id.is_some());
    for row in tenant_rows.into_iter().chain(agent_rows) {
        merged.insert(row.module_key, row.enabled);
    }
    merged
        .into_iter()
        .map(|(module_key, enabled)| ModuleFlag { module_key, enabled })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_rows_override_tenant_rows() {
        let rows = vec![
            ModuleRow::for_agent("transport", false, "a1"),
            ModuleRow::tenant_wide("transport", true),
            ModuleRow::tenant_wide("bookings", true),
            ModuleRow::for_agent("leads", true, "a1"),
        ];
        assert_eq!(
            merge_modules(rows),
            vec![
                ModuleFlag::new("bookings", true),
                ModuleFlag::new("leads", true),
                ModuleFlag::new("transport", false),
            ]
        );
    }

    #[test]
    fn parses_roles() {
        assert_eq!("Admin".parse::<AgentRole>(), Ok(AgentRole::Admin));
        assert!("superuser".parse::<AgentRole>().is_err());
        assert!(AgentRole::Owner.is_admin());
        assert!(!AgentRole::Agent.is_admin());
    }
}
