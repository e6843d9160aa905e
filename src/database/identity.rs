use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::error::DatabaseError;
use crate::database::models::{Agent, ModuleRow, Tenant};

/// Lookups the context resolver needs: domain → tenant, agent profile, modules.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Active tenant serving `domain` (already lowercased, no port).
    async fn tenant_by_domain(&self, domain: &str) -> Result<Option<Tenant>, DatabaseError>;

    async fn agent(&self, tenant_id: &str, agent_id: &str) -> Result<Option<Agent>, DatabaseError>;

    /// Tenant-wide module rows plus the rows specific to `agent_id`.
    async fn modules(&self, tenant_id: &str, agent_id: &str) -> Result<Vec<ModuleRow>, DatabaseError>;
}

pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn tenant_by_domain(&self, domain: &str) -> Result<Option<Tenant>, DatabaseError> {
        let tenant = sqlx::query_as::<_, Tenant>(
            "SELECT id::text AS id, name, domain, is_active
             FROM tenants
             WHERE lower(domain) = $1 AND is_active = true",
        )
        .bind(domain)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tenant)
    }

    async fn agent(&self, tenant_id: &str, agent_id: &str) -> Result<Option<Agent>, DatabaseError> {
        let agent = sqlx::query_as::<_, Agent>(
            "SELECT id::text AS id, tenant_id::text AS tenant_id, full_name, email, role, is_active
             FROM agents
             WHERE id::text = $1 AND tenant_id::text = $2",
        )
        .bind(agent_id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(agent)
    }

    async fn modules(&self, tenant_id: &str, agent_id: &str) -> Result<Vec<ModuleRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ModuleRow>(
            "SELECT module_key, enabled, agent_id::text AS agent_id
             FROM feature_modules
             WHERE tenant_id::text = $1 AND (agent_id IS NULL OR agent_id::text = $2)",
        )
        .bind(tenant_id)
        .bind(agent_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
