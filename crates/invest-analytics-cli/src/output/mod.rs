pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Render a command result in the requested format.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Pretty-printed JSON is the default format; small enough to live in
/// the dispatcher rather than its own module.
fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to serialise output: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_format_renders_without_panic() {
        let value = json!({
            "result": { "values": [1.0, null, 2.5], "window": 3 },
            "indicator": "sma",
        });
        for format in [
            OutputFormat::Json,
            OutputFormat::Table,
            OutputFormat::Csv,
            OutputFormat::Minimal,
        ] {
            format_output(&format, &value);
        }
    }

    #[test]
    fn test_json_handles_non_object_values() {
        print_json(&json!([1, 2, 3]));
        print_json(&json!("bare string"));
    }
}
