use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use crate::cli::{utils::output_success, OutputFormat};
use crate::templates::{booking_template_csv, BOOKING_TEMPLATE_COLUMNS, BOOKING_TEMPLATE_FILENAME};

#[derive(Args)]
pub struct TemplateArgs {
    #[arg(short, long, help = "Write to this file instead of stdout")]
    pub output: Option<PathBuf>,
}

pub fn handle(args: TemplateArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let csv = booking_template_csv()?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &csv)?;
            output_success(
                &output_format,
                &format!("Wrote {}", path.display()),
                Some(json!({ "path": path, "columns": BOOKING_TEMPLATE_COLUMNS })),
            )
        }
        None => match output_format {
            OutputFormat::Text => {
                print!("{}", String::from_utf8_lossy(&csv));
                Ok(())
            }
            OutputFormat::Json => output_success(
                &output_format,
                BOOKING_TEMPLATE_FILENAME,
                Some(json!({ "columns": BOOKING_TEMPLATE_COLUMNS })),
            ),
        },
    }
}
