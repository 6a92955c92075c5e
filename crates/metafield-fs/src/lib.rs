//! File backend for metafield.
//!
//! Loads a metadata record from a `.json`, `.yaml` or `.yml` file, applies a
//! single field update and writes the canonically ordered record back:
//! - `content`: resolves `--content` values that point at a file
//! - `format`: JSON and YAML adapters with their own indentation rules
//! - `metadata_file`: the read, update, render and write cycle

pub mod config;
pub mod content;
pub mod error;
pub mod format;
pub mod json;
pub mod metadata_file;
pub mod yaml;

pub use config::{RenderOptions, YamlIndent};
pub use content::resolve_content;
pub use error::{FsError, Result};
pub use format::{Document, RecordFormat};
pub use yaml::to_yaml_value;
pub use metadata_file::{prepare_update, update_metadata, MetadataFile, UpdateOutcome};
