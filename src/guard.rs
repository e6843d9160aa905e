use tracing::warn;

use crate::context::AgentContext;
use crate::database::Resource;
use crate::error::AccessError;

/// Succeeds only when `module_key` is present and enabled for the agent.
///
/// Handlers call this before building any scoped operation, so a refusal
/// never reaches the accessor.
pub fn require_module(ctx: &AgentContext, module_key: &str) -> Result<(), AccessError> {
    if ctx.has_module(module_key) {
        return Ok(());
    }
    warn!(
        tenant = ctx.tenant_id(),
        agent = %ctx.agent_id,
        module = module_key,
        "module guard refused request"
    );
    Err(AccessError::ModuleDisabled(module_key.to_string()))
}

/// Module guard keyed by the resource being touched.
pub fn require_resource(ctx: &AgentContext, resource: Resource) -> Result<(), AccessError> {
    require_module(ctx, resource.module_key())
}

pub fn require_admin(ctx: &AgentContext) -> Result<(), AccessError> {
    if ctx.agent_role.is_admin() {
        Ok(())
    } else {
        Err(AccessError::Forbidden(format!(
            "Role '{}' may not access this resource",
            ctx.agent_role
        )))
    }
}
