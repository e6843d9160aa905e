use axum::extract::Extension;
use serde::Serialize;
use serde_json::json;

use crate::context::{AgentContext, AgentProfile, AgentRole, TenantContext};
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct AgentView {
    pub id: String,
    pub role: AgentRole,
    #[serde(flatten)]
    pub profile: AgentProfile,
    pub tenant: TenantContext,
}

/// GET /api/agent - the calling agent and its effective modules
pub async fn agent_get(Extension(ctx): Extension<AgentContext>) -> ApiResult<AgentView> {
    let modules = json!(ctx.modules);
    let view = AgentView {
        id: ctx.agent_id,
        role: ctx.agent_role,
        profile: ctx.agent,
        tenant: ctx.tenant,
    };
    Ok(ApiResponse::named("agent", view).with("modules", modules))
}
