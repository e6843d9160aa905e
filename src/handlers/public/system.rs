use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::database::DatabaseError;
use crate::state::AppState;

/// GET / - service information
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Umrah Portal API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "public": "/health, /api/templates/bookings.csv, /api/qr?hash=, /api/i18n/:locale",
            "tenant": "/api/tenant (host resolved)",
            "agent": "/api/agent, /api/bookings, /api/vouchers, /api/transport, /api/locator, /api/training, /api/leads (bearer token + module)",
            "admin": "/api/agents (bearer token + admin role + module)",
        }
    }))
}

/// GET /health - store reachability
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        ),
        Err(e) => {
            let store = match e {
                DatabaseError::Unconfigured => "unconfigured".to_string(),
                other => {
                    tracing::warn!("Health check failed: {}", other);
                    "unavailable".to_string()
                }
            };
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "store": store
                })),
            )
        }
    }
}
