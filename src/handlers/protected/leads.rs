use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Json, Path, Query, State};
use serde_json::Value;

use crate::context::AgentContext;
use crate::database::{Resource, Scope, ScopedInsert};
use crate::error::ApiError;
use crate::guard::require_resource;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::payload::{
    default_field, list_params, list_query, object_body, one_of, patch_update, require_any, require_fields,
    ListParams,
};

pub const LEAD_STATUSES: &[&str] = &["new", "contacted", "qualified", "converted", "lost"];

/// GET /api/leads
pub async fn leads_list(
    State(state): State<AppState>,
    Extension(ctx): Extension<AgentContext>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Vec<Value>> {
    require_resource(&ctx, Resource::Leads)?;
    let query = list_query(&ctx, Resource::Leads, list_params(query)?, state.config.api.max_page_size)?;

    let rows = state.store.select(&query).await?;
    Ok(ApiResponse::items(rows))
}

/// POST /api/leads
pub async fn leads_create(
    State(state): State<AppState>,
    Extension(ctx): Extension<AgentContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    require_resource(&ctx, Resource::Leads)?;
    let mut body = object_body(body)?;
    require_fields(&body, &["full_name"])?;
    require_any(&body, &["phone", "email"])?;
    one_of(&body, "status", LEAD_STATUSES)?;
    default_field(&mut body, "status", "new");

    let row = state
        .store
        .insert(&ScopedInsert::new(Scope::new(&ctx, Resource::Leads), body))
        .await?;
    Ok(ApiResponse::named("lead", row))
}

/// PATCH /api/leads/:id
pub async fn leads_update(
    State(state): State<AppState>,
    Extension(ctx): Extension<AgentContext>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    require_resource(&ctx, Resource::Leads)?;
    let changes = object_body(body)?;
    one_of(&changes, "status", LEAD_STATUSES)?;

    let update = patch_update(&ctx, Resource::Leads, id, changes)?;
    let row = state
        .store
        .update(&update)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Lead '{}' not found", update.id())))?;
    Ok(ApiResponse::named("lead", row))
}
