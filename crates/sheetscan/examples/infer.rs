//! Example: Infer the header row and column types of a file.
//!
//! Usage:
//!   cargo run --example infer -- <file_path>
//!
//! Example:
//!   cargo run --example infer -- exports/quarterly_sales.csv

use std::env;
use std::path::Path;

use sheetscan::Sheetscan;

fn main() -> sheetscan::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example infer -- <file_path>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example infer -- exports/quarterly_sales.csv");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Sheetscan: {}", file_path);
    println!("{}", separator);
    println!();

    let result = Sheetscan::new().analyze(path)?;

    println!("## Source Metadata");
    println!("  File: {}", result.source.file);
    println!("  Format: {}", result.source.format);
    println!("  Rows sampled: {}", result.source.row_count);
    println!("  Widest row: {}", result.source.width);
    println!();

    let schema = &result.schema;
    println!("## Header");
    if schema.header.is_found() {
        println!("  Row: {}", schema.header.offset);
        println!("  Names: {:?}", schema.header.headers);
    } else {
        println!("  No usable header row");
    }
    println!("  Modal width: {}", schema.modal_width);
    println!();

    println!("## Columns ({})", schema.column_count());
    println!();
    for col in &schema.columns {
        let votes: Vec<String> = col
            .tally
            .iter()
            .map(|(tag, weight)| format!("{}={}", tag, weight))
            .collect();
        println!(
            "  {:>3} {:20} {:10} {}",
            col.position,
            col.display_name(),
            col.inferred_type.to_string(),
            votes.join(" ")
        );
    }
    println!();

    println!("{}", separator);

    Ok(())
}
