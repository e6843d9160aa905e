use clap::Args;
use serde_json::{json, Value};
use std::time::Duration;

use crate::cli::{
    utils::{output_error, output_success},
    OutputFormat,
};
use crate::config::AppConfig;

#[derive(Args)]
pub struct HealthArgs {
    #[arg(long, help = "Server base URL (defaults to http://localhost:<PORTAL_API_PORT>)")]
    pub url: Option<String>,

    #[arg(long, default_value_t = 5, help = "Request timeout in seconds")]
    pub timeout: u64,
}

pub async fn handle(args: HealthArgs, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let base = args
        .url
        .unwrap_or_else(|| format!("http://localhost:{}", config.api.port));
    let url = format!("{}/health", base.trim_end_matches('/'));

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()?;
    let response = client.get(&url).send().await?;
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if status.is_success() {
        output_success(&output_format, &format!("{} is healthy", base), Some(json!({ "health": body })))
    } else {
        let store = body.get("store").and_then(Value::as_str).unwrap_or("unknown");
        output_error(&output_format, &format!("{} is degraded ({}, store: {})", base, status, store))?;
        anyhow::bail!("health check failed with status {}", status)
    }
}
