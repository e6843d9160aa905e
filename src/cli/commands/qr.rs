use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config::AppConfig;
use crate::qr::{render_png, voucher_payload};

#[derive(Args)]
pub struct QrArgs {
    #[arg(help = "Voucher verification hash")]
    pub hash: String,

    #[arg(short, long, help = "PNG file to write")]
    pub output: PathBuf,

    #[arg(long, help = "Override PORTAL_PUBLIC_BASE_URL")]
    pub base_url: Option<String>,
}

pub fn handle(args: QrArgs, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let base_url = args.base_url.or_else(|| config.tenancy.public_base_url.clone());
    let png = render_png(&args.hash, base_url.as_deref())?;
    std::fs::write(&args.output, &png)?;

    output_success(
        &output_format,
        &format!("Wrote {} ({} bytes)", args.output.display(), png.len()),
        Some(json!({
            "path": args.output,
            "payload": voucher_payload(&args.hash, base_url.as_deref()),
        })),
    )
}
