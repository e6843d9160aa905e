use axum::extract::Path;
use serde_json::json;
use std::collections::BTreeMap;

use crate::i18n::{messages, normalize_locale};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/i18n/:locale - catalogue with English fallbacks
pub async fn catalog(Path(locale): Path<String>) -> ApiResult<BTreeMap<&'static str, &'static str>> {
    Ok(ApiResponse::named("messages", messages(&locale)).with("locale", json!(normalize_locale(&locale))))
}
