use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Query, State};
use serde_json::Value;

use crate::context::AgentContext;
use crate::database::Resource;
use crate::guard::{require_admin, require_resource};
use crate::handlers::protected::payload::{list_params, list_query, ListParams};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/agents - agent directory of the tenant
pub async fn agents_list(
    State(state): State<AppState>,
    Extension(ctx): Extension<AgentContext>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Vec<Value>> {
    require_admin(&ctx)?;
    require_resource(&ctx, Resource::Agents)?;
    let query = list_query(&ctx, Resource::Agents, list_params(query)?, state.config.api.max_page_size)?;

    let rows = state.store.select(&query).await?;
    Ok(ApiResponse::items(rows))
}
