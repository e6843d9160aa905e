use crate::cli::OutputFormat;
use crate::config::AppConfig;

/// Secrets are `skip_serializing` on the config types and never printed.
pub fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Text => {
            print!("{}", serde_yaml::to_string(config)?);
            println!("# store credential: {}", if config.store.service_key.is_some() { "set" } else { "not set" });
            println!("# jwt secret: {}", if config.security.jwt_secret.is_empty() { "not set" } else { "set" });
        }
    }
    Ok(())
}
