use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Json, Query, State};
use chrono::Utc;
use serde_json::Value;

use crate::context::AgentContext;
use crate::database::{Resource, Scope, ScopedInsert};
use crate::guard::require_resource;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::payload::{list_params, list_query, number_in_range, object_body, optional_timestamp, ListParams};

/// GET /api/locator - latest pings first
pub async fn locator_list(
    State(state): State<AppState>,
    Extension(ctx): Extension<AgentContext>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Vec<Value>> {
    require_resource(&ctx, Resource::LocatorPings)?;
    let query = list_query(&ctx, Resource::LocatorPings, list_params(query)?, state.config.api.max_page_size)?;

    let rows = state.store.select(&query).await?;
    Ok(ApiResponse::items(rows))
}

/// POST /api/locator - record a position ping
pub async fn locator_create(
    State(state): State<AppState>,
    Extension(ctx): Extension<AgentContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    require_resource(&ctx, Resource::LocatorPings)?;
    let mut body = object_body(body)?;
    let latitude = number_in_range(&body, "latitude", -90.0, 90.0)?;
    let longitude = number_in_range(&body, "longitude", -180.0, 180.0)?;
    optional_timestamp(&body, "recorded_at")?;

    body.insert("latitude".into(), Value::from(latitude));
    body.insert("longitude".into(), Value::from(longitude));
    if !matches!(body.get("recorded_at"), Some(Value::String(_))) {
        body.insert("recorded_at".into(), Value::String(Utc::now().to_rfc3339()));
    }

    let row = state
        .store
        .insert(&ScopedInsert::new(Scope::new(&ctx, Resource::LocatorPings), body))
        .await?;
    Ok(ApiResponse::named("ping", row))
}
