//! Headers command - locate the header row only.

use super::{analyze, print_header, print_source};
use crate::cli::InferenceArgs;

pub fn run(
    args: InferenceArgs,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = analyze(&args)?;

    if json_output {
        let header = serde_json::json!({
            "file": result.source.file,
            "offset": result.schema.header.offset,
            "found": result.schema.header.is_found(),
            "headers": result.schema.header.headers,
            "modal_width": result.schema.modal_width,
        });
        println!("{}", serde_json::to_string_pretty(&header)?);
        return Ok(());
    }

    if verbose {
        print_source(&args.file, &result);
        println!();
    }
    print_header(&result);

    Ok(())
}
