use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Query, State};
use serde_json::Value;

use crate::context::AgentContext;
use crate::database::Resource;
use crate::guard::require_resource;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::payload::{list_params, list_query, ListParams};

/// GET /api/training - tenant-wide modules in course order
pub async fn training_list(
    State(state): State<AppState>,
    Extension(ctx): Extension<AgentContext>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Vec<Value>> {
    require_resource(&ctx, Resource::TrainingModules)?;
    let query = list_query(
        &ctx,
        Resource::TrainingModules,
        list_params(query)?,
        state.config.api.max_page_size,
    )?;

    let rows = state.store.select(&query).await?;
    Ok(ApiResponse::items(rows))
}
