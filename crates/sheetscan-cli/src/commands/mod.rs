//! CLI command implementations.

pub mod explain;
pub mod guess;
pub mod headers;

use std::path::Path;

use colored::Colorize;
use sheetscan::{InferenceResult, Sheetscan};
use tracing::debug;

use crate::cli::InferenceArgs;

/// Build the engine from the shared flags and run it on the input file.
pub(crate) fn analyze(args: &InferenceArgs) -> Result<InferenceResult, Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let config = args.to_config()?;
    debug!(?config, "resolved configuration");

    let sheetscan = Sheetscan::with_config(config);
    Ok(sheetscan.analyze(&args.file)?)
}

/// One-line description of the sampled source.
pub(crate) fn print_source(file: &Path, result: &InferenceResult) {
    println!(
        "{} {} ({}, {} rows sampled, {} columns)",
        "Scanned".cyan().bold(),
        file.display().to_string().white(),
        result.source.format,
        result.source.row_count,
        result.schema.column_count()
    );
}

/// Header location summary shared by `guess` and `headers`.
pub(crate) fn print_header(result: &InferenceResult) {
    let header = &result.schema.header;
    if header.is_found() {
        println!(
            "{} row {} (modal width {})",
            "Header:".yellow().bold(),
            header.offset.to_string().white().bold(),
            result.schema.modal_width
        );
        println!("  {}", header.headers.join(", "));
    } else {
        println!(
            "{} {}",
            "Header:".yellow().bold(),
            "none found".red()
        );
    }
}
