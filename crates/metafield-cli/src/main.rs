//! metafield CLI - Set one field of a JSON or YAML metadata record.

mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "metafield")]
#[command(author, version, about = "Insert or update one field of a metadata file")]
struct Cli {
    /// Path to the .json, .yaml or .yml metadata file
    #[arg(long = "metadata_file", visible_alias = "metadata-file")]
    metadata_file: PathBuf,

    /// Field to set (must be one of the canonical metadata fields)
    #[arg(long)]
    field: String,

    /// Value to store, or a path to a file holding it
    #[arg(long, allow_hyphen_values = true)]
    content: String,

    /// Print the updated file instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Report format
    #[arg(long, default_value = "human")]
    format: output::OutputFormat,
}

fn main() -> Result<()> {
    // Logs go to stderr so dry-run output stays clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    commands::set_field(&commands::SetFieldArgs {
        metadata_file: &cli.metadata_file,
        field: &cli.field,
        content: &cli.content,
        dry_run: cli.dry_run,
        format: cli.format,
    })
}
