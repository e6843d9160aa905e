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
    default_field, list_params, list_query, object_body, one_of, optional_timestamp, patch_update,
    require_fields, ListParams,
};

pub const TRANSPORT_STATUSES: &[&str] = &["requested", "confirmed", "dispatched", "completed", "cancelled"];

/// GET /api/transport - upcoming pickups first
pub async fn transport_list(
    State(state): State<AppState>,
    Extension(ctx): Extension<AgentContext>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Vec<Value>> {
    require_resource(&ctx, Resource::TransportBookings)?;
    let query = list_query(
        &ctx,
        Resource::TransportBookings,
        list_params(query)?,
        state.config.api.max_page_size,
    )?;

    let rows = state.store.select(&query).await?;
    Ok(ApiResponse::items(rows))
}

/// POST /api/transport
pub async fn transport_create(
    State(state): State<AppState>,
    Extension(ctx): Extension<AgentContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    require_resource(&ctx, Resource::TransportBookings)?;
    let mut body = object_body(body)?;
    require_fields(&body, &["pickup_location", "dropoff_location", "pickup_at"])?;
    optional_timestamp(&body, "pickup_at")?;
    one_of(&body, "status", TRANSPORT_STATUSES)?;
    default_field(&mut body, "status", "requested");

    let row = state
        .store
        .insert(&ScopedInsert::new(Scope::new(&ctx, Resource::TransportBookings), body))
        .await?;
    Ok(ApiResponse::named("transport", row))
}

/// PATCH /api/transport/:id
pub async fn transport_update(
    State(state): State<AppState>,
    Extension(ctx): Extension<AgentContext>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    require_resource(&ctx, Resource::TransportBookings)?;
    let changes = object_body(body)?;
    optional_timestamp(&changes, "pickup_at")?;
    one_of(&changes, "status", TRANSPORT_STATUSES)?;

    let update = patch_update(&ctx, Resource::TransportBookings, id, changes)?;
    let row = state
        .store
        .update(&update)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Transport booking '{}' not found", update.id())))?;

    tracing::info!(
        tenant = ctx.tenant_id(),
        agent = %ctx.agent_id,
        id = update.id(),
        "transport booking updated"
    );
    Ok(ApiResponse::named("transport", row))
}
