//! CLI command implementation.

use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use metafield_fs::prepare_update;
use std::path::Path;
use tracing::debug;

/// Arguments for a single field update.
pub struct SetFieldArgs<'a> {
    pub metadata_file: &'a Path,
    pub field: &'a str,
    pub content: &'a str,
    pub dry_run: bool,
    pub format: OutputFormat,
}

/// Set one field and rewrite the metadata file (or print it on a dry run).
pub fn set_field(args: &SetFieldArgs<'_>) -> Result<()> {
    let (file, update) = prepare_update(args.metadata_file, args.field, args.content)
        .context("Invalid --field or --metadata_file")?;
    debug!(path = %args.metadata_file.display(), dry_run = args.dry_run, "Setting field");

    if args.dry_run {
        let outcome = file
            .preview(&update)
            .with_context(|| format!("Failed to update {}", args.metadata_file.display()))?;
        print!("{}", outcome.rendered);
        if !outcome.rendered.ends_with('\n') {
            println!();
        }
        return Ok(());
    }

    let outcome = file
        .apply(&update)
        .with_context(|| format!("Failed to update {}", args.metadata_file.display()))?;
    output::print_outcome(&outcome, args.format)
}
