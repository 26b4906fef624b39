//! Implementation of `bibq check`.

use std::process::ExitCode;

use bibq_config::{Config, ConfigWarning, discover_config_files};

use crate::cli::context::CommandContext;

/// Exit codes for `bibq check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Configuration is valid with no warnings.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Configuration has warnings but is usable.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;
    /// Configuration has errors and cannot be used.
    pub const ERROR: ExitCode = ExitCode::FAILURE;
}

/// Validates configuration and reports problems.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);

    println!("Checking configuration...");
    println!();

    if config_files.is_empty() {
        println!("No configuration files found.");
        println!();
        println!("Run 'bibq init' to create a configuration file.");
        return exit_codes::OK;
    }

    println!("Config files:");
    for path in &config_files {
        println!("  {}", path.display());
    }
    println!();

    let config = match Config::load_from_files(&config_files) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return exit_codes::ERROR;
        }
    };

    println!("Fields:");
    if config.fields.fields().next().is_none() {
        println!("  (none defined)");
    } else {
        for (name, tags) in config.fields.fields() {
            println!("  {name} -> {}", tags.join(", "));
        }
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return exit_codes::OK;
    }

    println!("Warnings ({}):", warnings.len());
    for warning in &warnings {
        println!("  - {warning}");
    }
    println!();

    print_hints(&warnings);

    exit_codes::WARNINGS
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .map(|warning| match warning {
            ConfigWarning::FieldNotPrefixable { .. } => {
                "Field names may only use letters, digits and '_'."
            }
            ConfigWarning::FieldLooksLikeTag { .. } => {
                "Rename fields that look like tags; the field hides the tag."
            }
            ConfigWarning::TagNotTagShaped { .. } => {
                "List codes that are tags but don't look like one under [tags] extra."
            }
            ConfigWarning::EmptyFieldMapping { .. } => {
                "Give every field at least one tag, or remove it."
            }
            ConfigWarning::UnknownDefaultField { .. } => {
                "Set [search] default_field to a defined field or a tag."
            }
        })
        .collect();

    hints.sort();
    hints.dedup();

    println!("Hints:");
    for hint in hints {
        println!("  - {hint}");
    }
}
