//! Explain command - show the weighted votes behind each column type.

use colored::Colorize;

use super::{analyze, print_header, print_source};
use crate::cli::InferenceArgs;

pub fn run(args: InferenceArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let result = analyze(&args)?;

    if verbose {
        print_source(&args.file, &result);
        println!();
    }
    print_header(&result);
    if result.schema.header.is_found() {
        println!("  (row {} excluded from votes)", result.schema.header.offset);
    }

    for column in &result.schema.columns {
        println!();
        println!(
            "{} {} -> {}",
            format!("[{}]", column.position).dimmed(),
            column.display_name().white().bold(),
            column.inferred_type.to_string().green().bold()
        );

        let winner = column.tally.winner();
        for (tag, weight) in column.tally.iter() {
            let marker = if tag == winner { "*".green().bold() } else { " ".normal() };
            println!("   {} {:10} {:>6}", marker, tag.as_str(), weight);
        }
    }

    Ok(())
}
