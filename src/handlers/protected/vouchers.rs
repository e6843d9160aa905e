use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Json, Query, State};
use serde_json::Value;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::context::AgentContext;
use crate::database::{Resource, Scope, ScopedInsert, ScopedQuery};
use crate::error::ApiError;
use crate::guard::require_resource;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::payload::{default_field, list_params, list_query, object_body, require_fields, ListParams};

/// Hex SHA-256 over the voucher's owners, booking and a fresh nonce.
pub fn verification_hash(tenant_id: &str, agent_id: &str, booking_id: &str, nonce: Uuid) -> String {
    let mut hasher = Sha256::new();
    for part in [tenant_id, agent_id, booking_id] {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    hasher.update(nonce.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// GET /api/vouchers
pub async fn vouchers_list(
    State(state): State<AppState>,
    Extension(ctx): Extension<AgentContext>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Vec<Value>> {
    require_resource(&ctx, Resource::Vouchers)?;
    let query = list_query(&ctx, Resource::Vouchers, list_params(query)?, state.config.api.max_page_size)?;

    let rows = state.store.select(&query).await?;
    Ok(ApiResponse::items(rows))
}

/// POST /api/vouchers - issue a voucher for one of the agent's bookings
pub async fn vouchers_create(
    State(state): State<AppState>,
    Extension(ctx): Extension<AgentContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    require_resource(&ctx, Resource::Vouchers)?;
    // Issuing reads the agent's bookings
    require_resource(&ctx, Resource::Bookings)?;
    let mut body = object_body(body)?;
    require_fields(&body, &["booking_id", "voucher_type"])?;

    let booking_id = match body.get("booking_id") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };

    // The booking must be visible in the same scope
    let booking = ScopedQuery::new(Scope::new(&ctx, Resource::Bookings))
        .filter_eq("id", booking_id.clone())
        .limit(1);
    if state.store.select(&booking).await?.is_empty() {
        return Err(ApiError::not_found(format!("Booking '{}' not found", booking_id)));
    }

    let hash = verification_hash(ctx.tenant_id(), &ctx.agent_id, &booking_id, Uuid::new_v4());
    body.insert("verification_hash".into(), Value::String(hash));
    default_field(&mut body, "status", "issued");

    let row = state
        .store
        .insert(&ScopedInsert::new(Scope::new(&ctx, Resource::Vouchers), body))
        .await?;
    Ok(ApiResponse::named("voucher", row))
}
