//! YAML record adapter.
//!
//! Records are parsed with `serde_yaml` and written back block-style, one
//! top-level entry at a time, so the sequence indentation can follow the
//! configured `YamlIndent` instead of the serializer's flush-left default.
//! Comments survive the round trip through a `Layout`:
//! - comments before the first key stay at the top of the document
//! - comments and blank lines between entries move with the entry that follows them
//! - end-of-line comments stay on their entry's first line
//! - comments inside a list or mapping value stay under its key
//! - comments after the last entry stay at the end

use crate::config::YamlIndent;
use crate::error::{FsError, Result};
use metafield_core::Record;
use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;
use std::collections::HashMap;

/// Comment placement captured from a YAML source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    header: Vec<String>,
    leading: HashMap<String, Vec<String>>,
    inline: HashMap<String, String>,
    nested: HashMap<String, Vec<String>>,
    footer: Vec<String>,
}

/// Shape of the top-level entry the scanner is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryShape {
    /// Value on the key line.
    Inline,
    /// `|` or `>` literal; indented lines are content.
    BlockScalar,
    /// Empty key line followed by an indented list or mapping.
    Collection,
}

impl Layout {
    /// Capture comments, blank separator lines and the document start marker.
    #[must_use]
    pub fn scan(text: &str) -> Self {
        let mut layout = Self::default();
        let mut pending: Vec<String> = Vec::new();
        let mut current: Option<(String, EntryShape)> = None;

        for line in text.lines() {
            let line = line.trim_end();
            let top_level = !line.starts_with(char::is_whitespace);

            if line.is_empty()
                || (top_level && line.starts_with('#'))
                || (current.is_none() && line.starts_with("---"))
            {
                pending.push(line.to_string());
                continue;
            }

            if top_level {
                if let Some((key, rest)) = split_key_line(line) {
                    let mut block = std::mem::take(&mut pending);
                    match &current {
                        None => {
                            if block.iter().any(|l| !l.is_empty()) {
                                layout.header = block;
                            }
                        }
                        Some((_, shape)) => {
                            // Blank lines right after a literal may belong to it.
                            if *shape == EntryShape::BlockScalar {
                                let content = block.iter().take_while(|l| l.is_empty()).count();
                                block.drain(..content);
                            }
                            if !block.is_empty() {
                                layout.leading.insert(key.clone(), block);
                            }
                        }
                    }

                    let (value, comment) = split_inline_comment(rest);
                    if let Some(comment) = comment {
                        layout.inline.insert(key.clone(), comment.to_string());
                    }
                    let shape = if value.is_empty() {
                        EntryShape::Collection
                    } else if is_block_header(value) {
                        EntryShape::BlockScalar
                    } else {
                        EntryShape::Inline
                    };
                    current = Some((key, shape));
                    continue;
                }
            }

            // Content of the current entry.
            pending.clear();
            if let Some((key, shape)) = &mut current {
                if *shape == EntryShape::Collection {
                    let body = line.trim_start();
                    if body.starts_with('#') {
                        layout.nested.entry(key.clone()).or_default().push(line.to_string());
                    } else if body.rsplit(' ').next().is_some_and(is_block_header) {
                        // Indented lines from here on may be literal content.
                        *shape = EntryShape::BlockScalar;
                    }
                }
            }
        }

        if pending.iter().any(|line| line.starts_with('#')) {
            while pending.last().is_some_and(String::is_empty) {
                pending.pop();
            }
            if current.is_some() {
                layout.footer = pending;
            } else {
                layout.header = pending;
            }
        }

        layout
    }

    /// Whether nothing besides the entries themselves was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
            && self.leading.is_empty()
            && self.inline.is_empty()
            && self.nested.is_empty()
            && self.footer.is_empty()
    }
}

/// `|`, `>` and their chomping/indent variants.
fn is_block_header(value: &str) -> bool {
    value.len() <= 3 && matches!(value.chars().next(), Some('|' | '>'))
}

/// Split a column-zero `key: value` line into the key and the text after `:`.
fn split_key_line(line: &str) -> Option<(String, &str)> {
    let first = line.chars().next()?;
    if first.is_whitespace() || line == "-" || line.starts_with("- ") || line.starts_with("...") {
        return None;
    }

    if first == '"' || first == '\'' {
        let close = closing_quote(line)?;
        let rest = line[close..].strip_prefix(':')?;
        let key = serde_yaml::from_str::<String>(&line[..close]).ok()?;
        return Some((key, rest));
    }

    if let Some(end) = line.find(": ") {
        return Some((line[..end].trim_end().to_string(), &line[end + 1..]));
    }
    let key = line.strip_suffix(':')?;
    Some((key.trim_end().to_string(), ""))
}

/// Byte offset just past the quoted scalar that opens `text`.
fn closing_quote(text: &str) -> Option<usize> {
    let quote = text.chars().next()?;
    let bytes = text.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if quote == '"' => i += 1,
            b'\'' if quote == '\'' && bytes.get(i + 1) == Some(&b'\'') => i += 1,
            b if b == quote as u8 => return Some(i + 1),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Split the text after a key into the value and an end-of-line comment.
///
/// The comment keeps the whitespace in front of its `#`.
fn split_inline_comment(rest: &str) -> (&str, Option<&str>) {
    let value = rest.trim_start();
    if value.starts_with('#') {
        return ("", Some(rest));
    }

    let skip = match value.chars().next() {
        Some('"' | '\'') => closing_quote(value).unwrap_or(value.len()),
        _ => 0,
    };
    let offset = rest.len() - value.len();
    let hash = value[skip..]
        .match_indices(" #")
        .chain(value[skip..].match_indices("\t#"))
        .map(|(i, _)| i + skip)
        .min();

    match hash {
        Some(i) => {
            let start = value[..i].trim_end().len();
            (&value[..start], Some(&rest[offset + start..]))
        }
        None => (value.trim_end(), None),
    }
}

fn is_blank_document(text: &str) -> bool {
    text.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

const fn yaml_kind(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "a boolean",
        YamlValue::Number(_) => "a number",
        YamlValue::String(_) => "a string",
        YamlValue::Sequence(_) => "a list",
        YamlValue::Mapping(_) => "a mapping",
        YamlValue::Tagged(_) => "a tagged value",
    }
}

/// Convert a parsed YAML value into the record's value type.
///
/// Values the record cannot hold exactly are rejected rather than dropped.
fn from_yaml(value: YamlValue) -> std::result::Result<Value, &'static str> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(flag) => Value::Bool(flag),
        YamlValue::Number(number) => {
            if let Some(int) = number.as_i64() {
                Value::from(int)
            } else if let Some(int) = number.as_u64() {
                Value::from(int)
            } else {
                number
                    .as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or("non-finite number")?
            }
        }
        YamlValue::String(text) => Value::String(text),
        YamlValue::Sequence(items) => {
            Value::Array(items.into_iter().map(from_yaml).collect::<std::result::Result<_, _>>()?)
        }
        YamlValue::Mapping(mapping) => {
            let mut fields = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                let YamlValue::String(key) = key else {
                    return Err("non-string key");
                };
                fields.insert(key, from_yaml(value)?);
            }
            Value::Object(fields)
        }
        YamlValue::Tagged(_) => return Err("tagged value"),
    })
}

/// Convert a record value for YAML serialization.
///
/// Integers wider than 64 bits become floats here; top-level entries and
/// their list items are rendered from the exact digits instead.
#[must_use]
pub fn to_yaml_value(value: &Value) -> YamlValue {
    match value {
        Value::Null => YamlValue::Null,
        Value::Bool(flag) => YamlValue::Bool(*flag),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                YamlValue::Number(int.into())
            } else if let Some(int) = number.as_u64() {
                YamlValue::Number(int.into())
            } else {
                YamlValue::Number(number.as_f64().unwrap_or(f64::NAN).into())
            }
        }
        Value::String(text) => YamlValue::String(text.clone()),
        Value::Array(items) => YamlValue::Sequence(items.iter().map(to_yaml_value).collect()),
        Value::Object(fields) => YamlValue::Mapping(
            fields
                .iter()
                .map(|(k, v)| (YamlValue::String(k.clone()), to_yaml_value(v)))
                .collect(),
        ),
    }
}

/// Parse a YAML mapping into a record and its comment layout.
///
/// An empty document yields an empty record.
///
/// # Errors
/// Returns `FsError::Yaml` for invalid YAML, `FsError::NotAMapping` if the
/// document is not a mapping and `FsError::UnsupportedValue` for entries that
/// cannot be carried through a rewrite unchanged.
pub fn parse(text: &str) -> Result<(Record, Layout)> {
    let layout = Layout::scan(text);
    if is_blank_document(text) {
        return Ok((Record::new(), layout));
    }

    match serde_yaml::from_str::<YamlValue>(text)? {
        YamlValue::Mapping(mapping) => {
            let mut record = Record::new();
            for (key, value) in mapping {
                let YamlValue::String(field) = key else {
                    return Err(FsError::UnsupportedValue {
                        field: block_text(&key)?,
                        reason: "non-string key",
                    });
                };
                let value = from_yaml(value)
                    .map_err(|reason| FsError::UnsupportedValue { field: field.clone(), reason })?;
                record.insert(field, value);
            }
            Ok((record, layout))
        }
        YamlValue::Null => Ok((Record::new(), layout)),
        other => Err(FsError::NotAMapping(yaml_kind(&other))),
    }
}

/// Render a record as a block-style YAML mapping, comments included.
///
/// # Errors
/// Returns `FsError::Yaml` if a value cannot be serialized.
pub fn render(record: &Record, layout: &Layout, indent: &YamlIndent) -> Result<String> {
    let mut out = String::new();

    push_lines(&mut out, &layout.header);
    for (key, value) in record.iter() {
        if let Some(block) = layout.leading.get(key) {
            // No blank lines at the very top of the document.
            let skip = if out.is_empty() {
                block.iter().take_while(|l| l.is_empty()).count()
            } else {
                0
            };
            push_lines(&mut out, &block[skip..]);
        }
        let comment = layout.inline.get(key).map_or("", String::as_str);
        let nested = layout.nested.get(key).map_or(&[][..], Vec::as_slice);
        write_entry(&mut out, key, value, comment, nested, indent)?;
    }
    push_lines(&mut out, &layout.footer);

    Ok(out)
}

fn push_lines(out: &mut String, lines: &[String]) {
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
}

/// Serialize a single value, without the trailing newline.
fn block_text<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut text = serde_yaml::to_string(value)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// YAML text for a value; numbers keep their exact digits.
fn value_text(value: &Value) -> Result<String> {
    match value {
        Value::Number(number) => Ok(number.to_string()),
        other => block_text(&to_yaml_value(other)),
    }
}

/// Push `text` after `prefix` with `suffix` on its first line, indenting every
/// following line by `indent`.
fn push_continued(out: &mut String, prefix: &str, text: &str, suffix: &str, indent: usize) {
    let mut lines = text.split('\n');
    out.push_str(prefix);
    out.push_str(lines.next().unwrap_or_default());
    out.push_str(suffix);
    out.push('\n');
    for line in lines {
        if !line.is_empty() {
            out.push_str(&" ".repeat(indent));
            out.push_str(line);
        }
        out.push('\n');
    }
}

fn write_entry(
    out: &mut String,
    key: &str,
    value: &Value,
    comment: &str,
    nested: &[String],
    indent: &YamlIndent,
) -> Result<()> {
    let key = block_text(key)?;

    match value {
        Value::Array(items) if !items.is_empty() => {
            push_continued(out, &key, ":", comment, 0);
            push_lines(out, nested);
            let prefix = indent.item_prefix();
            for item in items {
                push_continued(out, &prefix, &value_text(item)?, "", prefix.len());
            }
        }
        Value::Object(fields) if !fields.is_empty() => {
            push_continued(out, &key, ":", comment, 0);
            push_lines(out, nested);
            let block = block_text(&to_yaml_value(value))?;
            push_continued(out, &" ".repeat(indent.mapping), &block, "", indent.mapping);
        }
        _ => push_continued(out, &format!("{key}: "), &value_text(value)?, comment, indent.mapping),
    }

    Ok(())
}
