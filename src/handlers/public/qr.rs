use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::qr::{render_png, QrError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QrQuery {
    pub hash: Option<String>,
}

/// GET /api/qr?hash=<hash> - voucher QR code as PNG
pub async fn voucher_qr(
    State(state): State<AppState>,
    query: Result<Query<QrQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::malformed_input(e.body_text()))?;
    let hash = query
        .hash
        .ok_or_else(|| ApiError::malformed_input("Query parameter 'hash' is required"))?;

    let png = render_png(&hash, state.config.tenancy.public_base_url.as_deref()).map_err(|e| match e {
        QrError::InvalidHash => ApiError::malformed_input(QrError::InvalidHash.to_string()),
        other => {
            tracing::error!("QR rendering failed: {}", other);
            ApiError::internal_server_error("Failed to render QR code")
        }
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        png,
    )
        .into_response())
}
