use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Resolves the [`TenantContext`](crate::context::TenantContext) from the
/// request host and injects it as an extension.
pub async fn resolve_tenant_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let tenant = state.resolver.resolve_tenant(request.headers()).await?;
    request.extensions_mut().insert(tenant);
    Ok(next.run(request).await)
}

/// Resolves the full [`AgentContext`](crate::context::AgentContext): tenant,
/// bearer token, agent and modules. Module checks stay with each handler.
pub async fn resolve_agent_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = state.resolver.resolve_agent(request.headers()).await?;
    tracing::debug!(
        tenant = ctx.tenant_id(),
        agent = %ctx.agent_id,
        path = %request.uri().path(),
        "agent context resolved"
    );
    request.extensions_mut().insert(ctx);
    Ok(next.run(request).await)
}
