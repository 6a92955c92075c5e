//! Resolution of `--content` values.

use metafield_core::RawContent;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Resolve raw command-line content.
///
/// Content containing a `.` that names an existing file is replaced by the
/// file's text with trailing whitespace removed. File text containing a `,`
/// becomes a list of items. Anything else is used verbatim.
#[must_use]
pub fn resolve_content(raw: &str) -> RawContent {
    if !raw.contains('.') || !Path::new(raw).is_file() {
        return RawContent::Text(raw.to_string());
    }

    match fs::read_to_string(raw) {
        Ok(text) => {
            let text = text.trim_end();
            debug!(path = %raw, bytes = text.len(), "Read content from file reference");
            if text.contains(',') {
                RawContent::Items(text.split(',').map(String::from).collect())
            } else {
                RawContent::Text(text.to_string())
            }
        }
        Err(err) => {
            warn!(
                path = %raw,
                error = %err,
                "Content file is not readable, using the value literally"
            );
            RawContent::Text(raw.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_inline_content_is_verbatim() {
        assert_eq!(resolve_content("4.2"), RawContent::Text("4.2".into()));
        assert_eq!(resolve_content("a,b"), RawContent::Text("a,b".into()));
    }

    #[test]
    fn test_missing_file_is_treated_literally() {
        assert_eq!(
            resolve_content("does/not/exist.txt"),
            RawContent::Text("does/not/exist.txt".into())
        );
    }

    #[test]
    fn test_file_reference_with_commas_becomes_items() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tags.txt");
        fs::write(&path, "a,b,c\n").unwrap();

        let content = resolve_content(path.to_str().unwrap());
        assert_eq!(content, RawContent::Items(vec!["a".into(), "b".into(), "c".into()]));
    }

    #[test]
    fn test_file_reference_without_commas_is_text() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("description.md");
        fs::write(&path, "A model that predicts things.\n\n").unwrap();

        let content = resolve_content(path.to_str().unwrap());
        assert_eq!(content, RawContent::Text("A model that predicts things.".into()));
    }

    #[test]
    fn test_directory_with_dot_is_treated_literally() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("v1.0");
        fs::create_dir(&dir).unwrap();

        let raw = dir.to_str().unwrap();
        assert_eq!(resolve_content(raw), RawContent::Text(raw.to_string()));
    }
}
