use anyhow::Context;
use clap::Args;
use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::{utils::output_success, OutputFormat};
use crate::config::AppConfig;
use crate::context::AgentRole;

#[derive(Args)]
pub struct TokenArgs {
    #[arg(help = "Tenant id the token is issued for")]
    pub tenant_id: String,

    #[arg(help = "Agent id (token subject)")]
    pub agent_id: String,

    #[arg(long, default_value = "agent", help = "Role: owner, admin or agent")]
    pub role: String,

    #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
    pub hours: Option<u64>,
}

pub fn handle(args: TokenArgs, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let role: AgentRole = args.role.parse().map_err(anyhow::Error::msg)?;
    let hours = args.hours.unwrap_or(config.security.jwt_expiry_hours);
    let claims = Claims::new(args.tenant_id, args.agent_id, role, hours);

    let token = generate_jwt(&claims, &config.security.jwt_secret)
        .context("set SECURITY_JWT_SECRET before minting tokens")?;

    match output_format {
        OutputFormat::Text => println!("{}", token),
        OutputFormat::Json => output_success(
            &output_format,
            "Token issued",
            Some(json!({ "token": token, "expires_at": claims.exp, "claims": claims })),
        )?,
    }
    Ok(())
}
