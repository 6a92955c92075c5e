//! Single-field updates of metadata files on disk.

use crate::config::RenderOptions;
use crate::content::resolve_content;
use crate::error::Result;
use crate::format::RecordFormat;
use metafield_core::{validate_field, FieldUpdate};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A JSON or YAML metadata file.
#[derive(Debug, Clone)]
pub struct MetadataFile {
    /// Location of the file.
    path: PathBuf,
    /// Format picked from the extension.
    format: RecordFormat,
}

/// Result of updating one field.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateOutcome {
    /// File that was updated.
    pub path: PathBuf,
    /// Field that was set.
    pub field: String,
    /// Value the field held before, if any.
    pub previous: Option<Value>,
    /// Value now stored.
    pub stored: Value,
    /// Whether the rendered file differs from what was on disk.
    pub changed: bool,
    /// Full rendered file contents.
    #[serde(skip)]
    pub rendered: String,
}

impl MetadataFile {
    /// Open a metadata file handle. Only the extension is checked here.
    ///
    /// # Errors
    /// Returns `FsError::UnsupportedFormat` if the extension is not supported.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let format = RecordFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    /// Compute the updated file contents without writing them.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed or rendered.
    pub fn preview(&self, update: &FieldUpdate) -> Result<UpdateOutcome> {
        let original = fs::read_to_string(&self.path)?;
        let mut document = self.format.parse(&original)?;
        debug!(path = %self.path.display(), fields = document.record.len(), "Loaded metadata");

        let previous = document.record.apply(update);
        let stored = document.record.get(&update.field).cloned().unwrap_or(Value::Null);
        let rendered = self.format.render(&document, &RenderOptions::default())?;

        Ok(UpdateOutcome {
            path: self.path.clone(),
            field: update.field.clone(),
            previous,
            stored,
            changed: rendered != original,
            rendered,
        })
    }

    /// Apply an update and overwrite the file.
    ///
    /// Nothing is written unless the whole document rendered successfully.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed, rendered or written.
    pub fn apply(&self, update: &FieldUpdate) -> Result<UpdateOutcome> {
        let outcome = self.preview(update)?;
        fs::write(&self.path, &outcome.rendered)?;

        info!(
            path = %self.path.display(),
            field = %update.field,
            changed = outcome.changed,
            "Updated metadata field"
        );

        Ok(outcome)
    }
}

/// Validate an invocation and build the file handle and update for it.
///
/// The field name is checked first, then the file extension, then `content`
/// is resolved. The metadata file itself is not read.
///
/// # Errors
/// Returns a config error for an unsupported field or extension.
pub fn prepare_update(
    path: impl AsRef<Path>,
    field: &str,
    content: &str,
) -> Result<(MetadataFile, FieldUpdate)> {
    validate_field(field)?;
    let file = MetadataFile::open(path)?;
    let content = resolve_content(content);
    debug!(field, ?content, "Resolved content");
    let update = FieldUpdate::parse(field, &content)?;
    Ok((file, update))
}

/// Set `field` in the file at `path` from raw command-line content.
///
/// # Errors
/// Returns a config error for an unsupported field or extension, a parse
/// error for malformed contents, or an io error.
pub fn update_metadata(
    path: impl AsRef<Path>,
    field: &str,
    content: &str,
) -> Result<UpdateOutcome> {
    let (file, update) = prepare_update(path, field, content)?;
    file.apply(&update)
}
