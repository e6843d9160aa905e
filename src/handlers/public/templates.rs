use axum::{
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::templates::{booking_template_csv, BOOKING_TEMPLATE_FILENAME};

/// GET /api/templates/bookings.csv
pub async fn bookings_template() -> Result<Response, ApiError> {
    let body = booking_template_csv().map_err(|e| {
        tracing::error!("Failed to write booking template: {}", e);
        ApiError::internal_server_error("Failed to build template")
    })?;

    let disposition = format!("attachment; filename=\"{}\"", BOOKING_TEMPLATE_FILENAME);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
