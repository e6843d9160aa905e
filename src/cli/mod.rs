pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Portal CLI - operator tooling for the Umrah Portal API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Mint an agent token signed with the configured secret")]
    Token(commands::token::TokenArgs),

    #[command(about = "Print or write the bulk booking CSV template")]
    Template(commands::template::TemplateArgs),

    #[command(about = "Render a voucher QR code to a PNG file")]
    Qr(commands::qr::QrArgs),

    #[command(about = "Show the effective configuration (secrets omitted)")]
    Config,

    #[command(about = "Check the /health endpoint of a running server")]
    Health(commands::health::HealthArgs),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = crate::config::AppConfig::from_env();

    match cli.command {
        Commands::Token(args) => commands::token::handle(args, &config, output_format),
        Commands::Template(args) => commands::template::handle(args, output_format),
        Commands::Qr(args) => commands::qr::handle(args, &config, output_format),
        Commands::Config => commands::config::handle(&config, output_format),
        Commands::Health(args) => commands::health::handle(args, &config, output_format).await,
    }
}
