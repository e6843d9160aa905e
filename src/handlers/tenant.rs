use axum::extract::Extension;

use crate::context::TenantContext;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/tenant - tenant serving this host
pub async fn tenant_get(Extension(tenant): Extension<TenantContext>) -> ApiResult<TenantContext> {
    Ok(ApiResponse::named("tenant", tenant))
}
