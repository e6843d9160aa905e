//! Request shape checks shared by the agent handlers.
//!
//! Extractor rejections arrive here as values rather than short-circuiting
//! the handler, so the module guard always runs before body validation.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query};
use chrono::DateTime;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::context::AgentContext;
use crate::database::{Resource, Scope, ScopedQuery, ScopedUpdate};
use crate::error::AccessError;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub status: Option<String>,
}

pub fn list_params(query: Result<Query<ListParams>, QueryRejection>) -> Result<ListParams, AccessError> {
    query
        .map(|Query(params)| params)
        .map_err(|e| AccessError::malformed(e.body_text()))
}

/// Scoped select for a list route, honouring `?limit=` and `?status=`.
pub fn list_query(
    ctx: &AgentContext,
    resource: Resource,
    params: ListParams,
    max_page_size: i64,
) -> Result<ScopedQuery, AccessError> {
    let limit = match params.limit {
        Some(limit) if limit < 1 || limit > max_page_size => {
            return Err(AccessError::malformed(format!(
                "limit must be between 1 and {}",
                max_page_size
            )))
        }
        Some(limit) => limit,
        None => max_page_size,
    };

    let mut query = ScopedQuery::new(Scope::new(ctx, resource)).limit(limit);
    if let Some(status) = params.status.filter(|s| !s.trim().is_empty()) {
        if !resource.has_status() {
            return Err(AccessError::malformed(format!(
                "{} cannot be filtered by status",
                resource.table()
            )));
        }
        query = query.filter_eq("status", status);
    }
    Ok(query)
}

/// The request body as a JSON object.
pub fn object_body(body: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, AccessError> {
    match body {
        Ok(Json(Value::Object(map))) => Ok(map),
        Ok(Json(_)) => Err(AccessError::malformed("Request body must be a JSON object")),
        Err(rejection) => Err(AccessError::malformed(rejection.body_text())),
    }
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

pub fn require_fields(body: &Map<String, Value>, fields: &[&str]) -> Result<(), AccessError> {
    let missing: Vec<&str> = fields.iter().copied().filter(|f| !is_present(body.get(*f))).collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AccessError::malformed(format!("Missing required field(s): {}", missing.join(", "))))
    }
}

pub fn require_any(body: &Map<String, Value>, fields: &[&str]) -> Result<(), AccessError> {
    if fields.iter().any(|f| is_present(body.get(*f))) {
        Ok(())
    } else {
        Err(AccessError::malformed(format!("At least one of {} is required", fields.join(", "))))
    }
}

/// Numeric field (number or numeric string) within `[min, max]`.
pub fn number_in_range(body: &Map<String, Value>, field: &str, min: f64, max: f64) -> Result<f64, AccessError> {
    let value = match body.get(field) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| AccessError::malformed(format!("'{}' must be a number", field)))?;

    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(AccessError::malformed(format!("'{}' must be between {} and {}", field, min, max)))
    }
}

/// When present, `field` must be an RFC 3339 timestamp.
pub fn optional_timestamp(body: &Map<String, Value>, field: &str) -> Result<(), AccessError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(()),
        Some(Value::String(s)) if DateTime::parse_from_rfc3339(s).is_ok() => Ok(()),
        Some(_) => Err(AccessError::malformed(format!("'{}' must be an RFC 3339 timestamp", field))),
    }
}

/// When present, `field` must be one of `allowed`.
pub fn one_of(body: &Map<String, Value>, field: &str, allowed: &[&str]) -> Result<(), AccessError> {
    match body.get(field) {
        None => Ok(()),
        Some(Value::String(s)) if allowed.contains(&s.as_str()) => Ok(()),
        Some(_) => Err(AccessError::malformed(format!(
            "'{}' must be one of: {}",
            field,
            allowed.join(", ")
        ))),
    }
}

/// Set `field` to `value` unless the body already carries it.
pub fn default_field(body: &mut Map<String, Value>, field: &str, value: &str) {
    if !is_present(body.get(field)) {
        body.insert(field.to_string(), Value::String(value.to_string()));
    }
}

/// Scoped update for a PATCH route; an empty change set is malformed.
pub fn patch_update(
    ctx: &AgentContext,
    resource: Resource,
    id: String,
    changes: Map<String, Value>,
) -> Result<ScopedUpdate, AccessError> {
    let update = ScopedUpdate::new(Scope::new(ctx, resource), id, changes);
    if update.is_empty() {
        return Err(AccessError::malformed("Request body contains no updatable fields"));
    }
    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::agent_context;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn limit_is_bounded() {
        let ctx = agent_context("t1", "a1", &[]);
        let params = ListParams { limit: Some(0), status: None };
        assert!(list_query(&ctx, Resource::Leads, params, 100).is_err());

        let params = ListParams { limit: Some(101), status: None };
        assert!(list_query(&ctx, Resource::Leads, params, 100).is_err());

        let query = list_query(&ctx, Resource::Leads, ListParams::default(), 100).unwrap();
        assert_eq!(query.limit_value(), Some(100));
    }

    #[test]
    fn status_becomes_filter() {
        let ctx = agent_context("t1", "a1", &[]);
        let params = ListParams { limit: Some(5), status: Some("new".into()) };
        let query = list_query(&ctx, Resource::Leads, params, 100).unwrap();
        assert_eq!(query.filters(), &[("status".to_string(), json!("new"))]);
    }

    #[test]
    fn status_filter_needs_a_status_column() {
        let ctx = agent_context("t1", "a1", &[]);
        for resource in [Resource::TrainingModules, Resource::LocatorPings, Resource::Agents] {
            let params = ListParams { limit: None, status: Some("active".into()) };
            assert!(matches!(
                list_query(&ctx, resource, params, 100),
                Err(AccessError::MalformedInput(_))
            ));
        }
    }

    #[test]
    fn required_fields_reject_blank_strings() {
        let b = body(json!({"package_name": "  ", "travel_date": "2026-03-01"}));
        let err = require_fields(&b, &["package_name", "travel_date"]).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field(s): package_name");
    }

    #[test]
    fn coordinates_are_range_checked() {
        let b = body(json!({"latitude": 21.4225, "longitude": "39.8262", "bad": 200}));
        assert!(number_in_range(&b, "latitude", -90.0, 90.0).is_ok());
        assert!(number_in_range(&b, "longitude", -180.0, 180.0).is_ok());
        assert!(number_in_range(&b, "bad", -90.0, 90.0).is_err());
        assert!(number_in_range(&b, "missing", -90.0, 90.0).is_err());
    }

    #[test]
    fn timestamps_and_enums() {
        let b = body(json!({"pickup_at": "2026-02-10T04:30:00+03:00", "status": "flying"}));
        assert!(optional_timestamp(&b, "pickup_at").is_ok());
        assert!(one_of(&b, "status", &["requested", "confirmed"]).is_err());
        assert!(optional_timestamp(&body(json!({"pickup_at": "tomorrow"})), "pickup_at").is_err());
    }

    #[test]
    fn patch_without_fields_is_malformed() {
        let ctx = agent_context("t1", "a1", &[]);
        let changes = body(json!({"id": "other", "agent_id": "a2"}));
        assert!(matches!(
            patch_update(&ctx, Resource::Leads, "l1".into(), changes),
            Err(AccessError::MalformedInput(_))
        ));
    }
}
