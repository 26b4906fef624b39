//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use bibq_query::SearchUnit;
use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;

/// Prints a value as compact JSON on one line.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Renders units as a table, one row per unit in wire form.
pub fn units_table(units: &[SearchUnit]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Op", "Term", "Field", "Match"]);
    for unit in units {
        table.add_row(unit.to_wire());
    }
    table
}
