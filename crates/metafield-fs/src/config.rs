//! Rendering configuration.

/// Indentation settings used when a record is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per nesting level in JSON output.
    pub json_indent: usize,

    /// YAML indentation.
    pub yaml: YamlIndent,
}

fn default_json_indent() -> usize {
    4
}

/// YAML indentation, in the mapping/sequence/offset terms block-style
/// emitters use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YamlIndent {
    /// Indent of nested mapping content and continuation lines.
    pub mapping: usize,

    /// Column of a sequence item's content, relative to its parent key.
    pub sequence: usize,

    /// Column of the `-` indicator, relative to its parent key.
    pub offset: usize,
}

fn default_mapping() -> usize {
    2
}

fn default_sequence() -> usize {
    4
}

fn default_offset() -> usize {
    2
}

impl Default for YamlIndent {
    fn default() -> Self {
        Self {
            mapping: default_mapping(),
            sequence: default_sequence(),
            offset: default_offset(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            json_indent: default_json_indent(),
            yaml: YamlIndent::default(),
        }
    }
}

impl YamlIndent {
    /// Prefix written before each sequence item, `-` included.
    ///
    /// The dash always gets at least one space after it.
    #[must_use]
    pub fn item_prefix(&self) -> String {
        let gap = self.sequence.saturating_sub(self.offset + 1).max(1);
        format!("{}-{}", " ".repeat(self.offset), " ".repeat(gap))
    }
}
