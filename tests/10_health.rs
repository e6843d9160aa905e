mod common;

use std::process::{Command, Stdio};
use std::time::Duration;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn build_safe_server_boots_without_store() -> Result<()> {
    let server = common::TestServer::spawn_build_safe()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["store"], "unconfigured");

    // Public byproducts still work
    let res = client
        .get(format!("{}/api/templates/bookings.csv", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // No identity store: every host is unknown
    let res = client.get(format!("{}/api/tenant", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "TENANT_NOT_FOUND");

    Ok(())
}

fn run_without_store(app_env: Option<&str>) -> std::process::Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_umrah-portal-api"));
    command
        .current_dir(std::env::temp_dir())
        .env("PORTAL_API_PORT", "0")
        .env_remove("APP_ENV")
        .env_remove("PORTAL_BUILD_SAFE")
        .env_remove("PORTAL_STORE_URL")
        .env_remove("DATABASE_URL")
        .env_remove("PORTAL_SERVICE_KEY")
        .stdin(Stdio::null());
    if let Some(app_env) = app_env {
        command.env("APP_ENV", app_env);
    }
    command.output().expect("failed to run server binary")
}

#[test]
fn missing_store_config_fails_fast_outside_build_safe() {
    for app_env in [None, Some("development"), Some("production")] {
        let output = run_without_store(app_env);
        assert!(!output.status.success(), "APP_ENV={:?} started without a store", app_env);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("PORTAL_STORE_URL"), "stderr was: {}", stderr);
    }
}
