//! Guess command - header row and column types.

use colored::Colorize;
use sheetscan::InferredType;

use super::{analyze, print_header, print_source};
use crate::cli::InferenceArgs;

pub fn run(
    args: InferenceArgs,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = analyze(&args)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_source(&args.file, &result);
    println!();
    print_header(&result);

    println!();
    println!("{}", "Columns:".yellow().bold());
    for column in &result.schema.columns {
        println!(
            "  {:>3}  {:24} {}",
            column.position,
            column.display_name(),
            colored_type(column.inferred_type)
        );
    }

    if verbose {
        println!();
        println!(
            "Data starts at row {}",
            result.schema.first_data_row().to_string().white().bold()
        );
        println!("Source hash: {}", result.source.hash.dimmed());
    }

    Ok(())
}

fn colored_type(ty: InferredType) -> colored::ColoredString {
    let label = ty.to_string();
    match ty {
        InferredType::String => label.white(),
        InferredType::Integer => label.cyan(),
        InferredType::Boolean => label.magenta(),
        InferredType::Date => label.green(),
    }
}
