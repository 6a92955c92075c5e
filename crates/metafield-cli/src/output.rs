//! Output formatting for the CLI.

use anyhow::Result;
use console::style;
use metafield_fs::{to_yaml_value, UpdateOutcome};
use serde_json::Value;

/// Output format for the update report.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// Print the report for a completed update.
pub fn print_outcome(outcome: &UpdateOutcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => println!("{}", human_display(outcome)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
        OutputFormat::Yaml => print!("{}", yaml_report(outcome)?),
    }
    Ok(())
}

/// Numbers go through the record's YAML conversion so they print as numbers.
fn yaml_report(outcome: &UpdateOutcome) -> Result<String> {
    let report = to_yaml_value(&serde_json::to_value(outcome)?);
    Ok(serde_yaml::to_string(&report)?)
}

fn human_display(outcome: &UpdateOutcome) -> String {
    let path = outcome.path.display();
    if !outcome.changed {
        return format!(
            "{} {path}: {} already set to {}",
            style("=").dim(),
            outcome.field,
            display_value(&outcome.stored)
        );
    }

    match &outcome.previous {
        Some(previous) => format!(
            "{} {path}: {} {} -> {}",
            style("✓").green(),
            outcome.field,
            display_value(previous),
            display_value(&outcome.stored)
        ),
        None => format!(
            "{} {path}: {} = {}",
            style("✓").green(),
            outcome.field,
            display_value(&outcome.stored)
        ),
    }
}

/// Compact single-line rendering of a stored value.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(display_value).collect();
            format!("[{}]", items.join(", "))
        }
        other => other.to_string(),
    }
}
