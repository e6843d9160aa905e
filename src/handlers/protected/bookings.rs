use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Json, Path, Query, State};
use serde::Serialize;
use serde_json::Value;

use crate::context::AgentContext;
use crate::database::{Resource, Scope, ScopedInsert, ScopedQuery};
use crate::error::ApiError;
use crate::guard::require_resource;
use crate::invoice::Invoice;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::payload::{default_field, list_params, list_query, object_body, require_fields, ListParams};

/// GET /api/bookings
pub async fn bookings_list(
    State(state): State<AppState>,
    Extension(ctx): Extension<AgentContext>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Vec<Value>> {
    require_resource(&ctx, Resource::Bookings)?;
    let query = list_query(&ctx, Resource::Bookings, list_params(query)?, state.config.api.max_page_size)?;

    let rows = state.store.select(&query).await?;
    Ok(ApiResponse::items(rows))
}

/// POST /api/bookings
pub async fn bookings_create(
    State(state): State<AppState>,
    Extension(ctx): Extension<AgentContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    require_resource(&ctx, Resource::Bookings)?;
    let mut body = object_body(body)?;
    require_fields(&body, &["package_name", "travel_date"])?;
    default_field(&mut body, "status", "pending");

    let row = state
        .store
        .insert(&ScopedInsert::new(Scope::new(&ctx, Resource::Bookings), body))
        .await?;
    tracing::info!(tenant = ctx.tenant_id(), agent = %ctx.agent_id, "booking created");
    Ok(ApiResponse::named("booking", row))
}

#[derive(Debug, Serialize)]
pub struct BookingInvoice {
    pub booking_id: String,
    pub currency: String,
    #[serde(flatten)]
    pub invoice: Invoice,
}

/// GET /api/bookings/:id/invoice
pub async fn booking_invoice(
    State(state): State<AppState>,
    Extension(ctx): Extension<AgentContext>,
    Path(id): Path<String>,
) -> ApiResult<BookingInvoice> {
    require_resource(&ctx, Resource::Bookings)?;

    let query = ScopedQuery::new(Scope::new(&ctx, Resource::Bookings))
        .filter_eq("id", id.clone())
        .limit(1);
    let booking = state
        .store
        .select(&query)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::not_found(format!("Booking '{}' not found", id)))?;

    let invoice = Invoice::from_booking(&booking).map_err(|e| ApiError::malformed_input(e.to_string()))?;
    let currency = booking
        .get("currency")
        .and_then(Value::as_str)
        .unwrap_or("SAR")
        .to_string();

    Ok(ApiResponse::named("invoice", BookingInvoice { booking_id: id, currency, invoice }))
}
