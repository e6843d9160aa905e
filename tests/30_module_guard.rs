mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;
use umrah_portal_api::context::AgentRole;
use umrah_portal_api::testing::{RecordedCall, SpyAccessor};
use umrah_portal_api::types::Operation;

use common::{build_app, identity, request, send, token, SAFA};

#[tokio::test]
async fn disabled_transport_blocks_update_before_any_call() {
    let spy = Arc::new(SpyAccessor::new());
    let store = identity().with_module("t1", Some("a1"), "transport", false);
    let app = build_app(spy.clone(), store);
    let t = token("t1", "a1", AgentRole::Agent);

    let (status, body) = send(
        app,
        request(Method::PATCH, "/api/transport/tb-42", SAFA, Some(&t), Some(json!({"status": "confirmed"}))),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "MODULE_DISABLED");
    assert_eq!(body["error"], "Module 'transport' is not enabled for this account");
    assert_eq!(spy.count(Operation::Update), 0);
    assert!(spy.calls().is_empty());
}

#[tokio::test]
async fn voucher_issue_needs_bookings_module_too() {
    let spy = Arc::new(SpyAccessor::new().with_rows(vec![json!({"id": "b1"})]));
    let store = identity().with_module("t1", Some("a1"), "bookings", false);
    let app = build_app(spy.clone(), store);
    let t = token("t1", "a1", AgentRole::Agent);

    let (status, body) = send(
        app,
        request(Method::POST, "/api/vouchers", SAFA, Some(&t), Some(json!({"booking_id": "b1", "voucher_type": "hotel"}))),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "MODULE_DISABLED");
    assert_eq!(body["error"], "Module 'bookings' is not enabled for this account");
    assert!(spy.calls().is_empty());
}

#[tokio::test]
async fn enabled_transport_issues_exactly_one_scoped_update() {
    let spy = Arc::new(SpyAccessor::new());
    let store = identity().with_module("t1", Some("a1"), "transport", true);
    let app = build_app(spy.clone(), store);
    let t = token("t1", "a1", AgentRole::Agent);

    let (status, body) = send(
        app,
        request(Method::PATCH, "/api/transport/tb-42", SAFA, Some(&t), Some(json!({"status": "confirmed"}))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transport"]["id"], "tb-42");
    assert_eq!(body["transport"]["status"], "confirmed");

    let calls = spy.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        RecordedCall::Update(update) => {
            assert_eq!(update.scope().tenant_id(), "t1");
            assert_eq!(update.scope().agent_id(), Some("a1"));
            assert_eq!(update.id(), "tb-42");
            assert_eq!(update.changes().get("status"), Some(&json!("confirmed")));
        }
        other => panic!("expected an update, got {:?}", other),
    }
}

#[tokio::test]
async fn guard_runs_before_body_validation() {
    let spy = Arc::new(SpyAccessor::new());
    let app = build_app(spy.clone(), identity());
    let t = token("t1", "a1", AgentRole::Agent);

    // No transport module and an unusable body: the module wins
    let (status, body) = send(
        app,
        request(Method::POST, "/api/transport", SAFA, Some(&t), Some(json!("not an object"))),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "MODULE_DISABLED");
    assert_eq!(spy.mutation_count(), 0);
}

#[tokio::test]
async fn every_agent_route_is_guarded() {
    let routes = [
        (Method::GET, "/api/bookings", None),
        (Method::POST, "/api/bookings", Some(json!({"package_name": "Ramadan 14N", "travel_date": "2027-02-20"}))),
        (Method::GET, "/api/bookings/b1/invoice", None),
        (Method::GET, "/api/vouchers", None),
        (Method::POST, "/api/vouchers", Some(json!({"booking_id": "b1", "voucher_type": "hotel"}))),
        (Method::GET, "/api/transport", None),
        (Method::POST, "/api/transport", Some(json!({"pickup_location": "JED", "dropoff_location": "Makkah", "pickup_at": "2027-02-20T08:00:00Z"}))),
        (Method::PATCH, "/api/transport/tb1", Some(json!({"status": "confirmed"}))),
        (Method::GET, "/api/locator", None),
        (Method::POST, "/api/locator", Some(json!({"latitude": 21.42, "longitude": 39.82}))),
        (Method::GET, "/api/training", None),
        (Method::GET, "/api/leads", None),
        (Method::POST, "/api/leads", Some(json!({"full_name": "Bilal", "phone": "+62 812 0000"}))),
        (Method::PATCH, "/api/leads/l1", Some(json!({"status": "contacted"}))),
    ];

    // Agent exists but every module is off for it
    let mut store = identity();
    for key in ["agents", "bookings", "vouchers", "transport", "locator", "training", "leads"] {
        store = store.with_module("t1", Some("a1"), key, false);
    }
    let t = token("t1", "a1", AgentRole::Agent);

    for (method, uri, body) in routes {
        let spy = Arc::new(SpyAccessor::new());
        let app = build_app(spy.clone(), store.clone());
        let (status, response) = send(app, request(method.clone(), uri, SAFA, Some(&t), body)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{} {}", method, uri);
        assert_eq!(response["code"], "MODULE_DISABLED", "{} {}", method, uri);
        assert!(spy.calls().is_empty(), "{} {} reached the accessor", method, uri);
    }
}

#[tokio::test]
async fn agent_directory_needs_admin_role_and_module() {
    let spy = Arc::new(SpyAccessor::new());
    let app = build_app(spy.clone(), identity());

    let agent = token("t1", "a1", AgentRole::Agent);
    let (status, body) = send(app.clone(), request(Method::GET, "/api/agents", SAFA, Some(&agent), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
    assert!(spy.calls().is_empty());

    let admin = token("t1", "admin1", AgentRole::Admin);
    let (status, _) = send(app, request(Method::GET, "/api/agents", SAFA, Some(&admin), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(spy.count(Operation::Select), 1);
    assert_eq!(spy.calls()[0].scope_ids(), ("t1".to_string(), None));
}
