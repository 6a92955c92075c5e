//! JSON record adapter.

use crate::error::{FsError, Result};
use metafield_core::Record;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

/// Parse a JSON object into a record.
///
/// # Errors
/// Returns `FsError::Json` for invalid JSON and `FsError::NotAMapping` if the
/// top-level value is not an object.
pub fn parse(text: &str) -> Result<Record> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(fields) => Ok(Record::from(fields)),
        other => Err(FsError::NotAMapping(kind(&other))),
    }
}

/// Render a record as indented JSON, without a trailing newline.
///
/// # Errors
/// Returns `FsError::Json` if serialization fails.
pub fn render(record: &Record, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut out, formatter);
    record.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
