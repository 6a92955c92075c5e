//! Format adapters for metadata files.

use crate::config::RenderOptions;
use crate::error::{FsError, Result};
use crate::{json, yaml};
use metafield_core::Record;
use std::path::Path;

/// Supported metadata file formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

/// A parsed metadata file.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// The record itself.
    pub record: Record,
    /// YAML comment placement; empty for JSON.
    layout: yaml::Layout,
}

impl Document {
    /// Wrap a record with no comment layout.
    #[must_use]
    pub fn new(record: Record) -> Self {
        Self {
            record,
            layout: yaml::Layout::default(),
        }
    }
}

impl RecordFormat {
    /// Pick the format for a path.
    ///
    /// # Errors
    /// Returns `FsError::UnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(FsError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Parse file contents.
    ///
    /// # Errors
    /// Returns a parse error if the contents are not a valid mapping.
    pub fn parse(self, text: &str) -> Result<Document> {
        match self {
            Self::Json => Ok(Document::new(json::parse(text)?)),
            Self::Yaml => {
                let (record, layout) = yaml::parse(text)?;
                Ok(Document { record, layout })
            }
        }
    }

    /// Render a document using the indentation in `options`.
    ///
    /// # Errors
    /// Returns an error if a value cannot be serialized.
    pub fn render(self, document: &Document, options: &RenderOptions) -> Result<String> {
        match self {
            Self::Json => json::render(&document.record, options.json_indent),
            Self::Yaml => yaml::render(&document.record, &document.layout, &options.yaml),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::YamlIndent;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_path() {
        let format = |name: &str| RecordFormat::from_path(Path::new(name)).unwrap();
        assert_eq!(format("a/metadata.json"), RecordFormat::Json);
        assert_eq!(format("metadata.yaml"), RecordFormat::Yaml);
        assert_eq!(format("metadata.yml"), RecordFormat::Yaml);
    }

    #[test]
    fn test_from_path_rejects_other_extensions() {
        for name in ["metadata.toml", "metadata", "metadata.JSON"] {
            let err = RecordFormat::from_path(Path::new(name)).unwrap_err();
            assert!(err.is_config_error(), "{name}");
        }
    }

    #[test]
    fn test_parse_and_render_dispatch() {
        let doc = RecordFormat::Yaml.parse("Title: Foo\n").unwrap();
        let options = RenderOptions::default();
        assert_eq!(
            RecordFormat::Json.render(&doc, &options).unwrap(),
            "{\n    \"Title\": \"Foo\"\n}"
        );
        assert_eq!(RecordFormat::Yaml.render(&doc, &options).unwrap(), "Title: Foo\n");
    }

    #[test]
    fn test_render_with_custom_indent() {
        let doc = RecordFormat::Yaml.parse("Title: Foo\nTag: [a, b]\n").unwrap();
        let options = RenderOptions {
            json_indent: 2,
            yaml: YamlIndent { mapping: 2, sequence: 2, offset: 0 },
        };
        assert_eq!(
            RecordFormat::Json.render(&doc, &options).unwrap(),
            "{\n  \"Title\": \"Foo\",\n  \"Tag\": [\n    \"a\",\n    \"b\"\n  ]\n}"
        );
        assert_eq!(
            RecordFormat::Yaml.render(&doc, &options).unwrap(),
            "Title: Foo\nTag:\n- a\n- b\n"
        );
    }
}
