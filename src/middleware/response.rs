use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Success body keyed by `items` for collections or by the resource name
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub key: &'static str,
    pub data: T,
    pub extra: Map<String, Value>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn named(key: &'static str, data: T) -> Self {
        Self {
            key,
            data,
            extra: Map::new(),
        }
    }

    /// Add a sibling field next to the primary key
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }
}

impl ApiResponse<Vec<Value>> {
    pub fn items(rows: Vec<Value>) -> Self {
        Self::named("items", rows)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Failed to serialize response data",
                        "code": "INTERNAL_SERVER_ERROR"
                    })),
                )
                    .into_response();
            }
        };

        let mut body = self.extra;
        body.insert(self.key.to_string(), data_value);
        (StatusCode::OK, Json(Value::Object(body))).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
