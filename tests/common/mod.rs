#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use umrah_portal_api::auth::{generate_jwt, Claims};
use umrah_portal_api::config::AppConfig;
use umrah_portal_api::context::AgentRole;
use umrah_portal_api::database::Stores;
use umrah_portal_api::testing::{SpyAccessor, StaticIdentityStore};
use umrah_portal_api::{app, AppState};

pub const SECRET: &str = "integration-secret";
pub const SAFA: &str = "safa.portal.test";
pub const MARWA: &str = "marwa.portal.test";

/// Two tenants; t1 has an agent, an admin and most modules on tenant-wide.
/// Transport is left to each test.
pub fn identity() -> StaticIdentityStore {
    let mut store = StaticIdentityStore::new()
        .with_tenant("t1", "Safa Travel", SAFA)
        .with_tenant("t2", "Marwa Tours", MARWA)
        .with_agent("t1", "a1", "Hamza Idris", "agent")
        .with_agent("t1", "admin1", "Aisha Rahman", "admin")
        .with_agent("t2", "a2", "Maryam Noor", "agent");
    for key in ["agents", "bookings", "vouchers", "locator", "training", "leads"] {
        store = store.with_module("t1", None, key, true);
    }
    store
}

pub fn config() -> AppConfig {
    let mut config = AppConfig::development();
    config.security.jwt_secret = SECRET.to_string();
    config.tenancy.public_base_url = Some("https://portal.example.com".to_string());
    config.api.max_page_size = 50;
    config
}

pub fn build_app(spy: Arc<SpyAccessor>, identity: StaticIdentityStore) -> Router {
    let stores = Stores::new(spy, Arc::new(identity));
    app(AppState::new(config(), stores))
}

pub fn token(tenant_id: &str, agent_id: &str, role: AgentRole) -> String {
    generate_jwt(&Claims::new(tenant_id.into(), agent_id.into(), role, 1), SECRET).expect("token")
}

pub fn request(method: Method, uri: &str, host: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri).header(header::HOST, host);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&value).expect("json body"))
        }
        None => Body::empty(),
    };
    builder.body(body).expect("request")
}

/// Drive one request through the router; non-JSON bodies come back as `Null`.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, _, bytes) = send_raw(app, request).await;
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

pub async fn send_raw(app: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, headers, bytes.to_vec())
}

/// The server binary in build-safe mode with no store configured.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    pub fn spawn_build_safe() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_umrah-portal-api"))
            .current_dir(std::env::temp_dir())
            .env("APP_ENV", "development")
            .env("PORTAL_API_PORT", port.to_string())
            .env("PORTAL_BUILD_SAFE", "true")
            .env_remove("PORTAL_STORE_URL")
            .env_remove("DATABASE_URL")
            .env_remove("PORTAL_SERVICE_KEY")
            .env_remove("PORTAL_DEV_DOMAIN")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    pub async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(format!("{}/health", self.base_url)).send().await {
                if resp.status() == reqwest::StatusCode::OK
                    || resp.status() == reqwest::StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
