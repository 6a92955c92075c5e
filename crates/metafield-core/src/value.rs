//! Value normalization.
//!
//! Raw text becomes a typed value in two passes:
//! - List detection: `[a, b]` and `(a, b)` become lists, anything else stays a single value
//! - Scalar coercion: quotes are stripped, then integer, float and text are tried in that order
//!
//! Normalization never fails. Text that does not look like a number stays text.

use serde::Serialize;
use serde_json::{Number, Value};

/// A single stored value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Text without a `.` that parses as a number. Digits are kept exactly.
    Integer(Number),
    /// Text with a `.` that parses as a finite number.
    Float(f64),
    /// Anything else, with quote characters removed.
    Text(String),
}

/// A normalized field value: one scalar or a flat list of scalars.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

/// Content handed to the normalizer.
///
/// `Items` comes from a comma-separated file reference and skips list detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawContent {
    Text(String),
    Items(Vec<String>),
}

impl RawContent {
    /// Normalize the content into a typed value.
    #[must_use]
    pub fn normalize(&self) -> FieldValue {
        match self {
            Self::Text(text) => normalize(text),
            Self::Items(items) => {
                FieldValue::List(items.iter().map(|item| coerce_scalar(item.trim())).collect())
            }
        }
    }
}

fn strip_quotes(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '\'' | '"')).collect()
}

/// Coerce a single piece of text into a scalar.
#[must_use]
pub fn coerce_scalar(raw: &str) -> Scalar {
    let cleaned = strip_quotes(raw);
    let candidate = cleaned.trim();

    if cleaned.contains('.') {
        return match candidate.parse::<f64>() {
            Ok(num) if num.is_finite() => Scalar::Float(num),
            _ => Scalar::Text(cleaned),
        };
    }

    if let Some(int) = parse_integer(candidate) {
        return Scalar::Integer(int);
    }

    // Exponent forms such as `1e3` have no `.` but still count as integers.
    match candidate.parse::<f64>() {
        Ok(num) if num.is_finite() => integer_from_float(num)
            .map_or(Scalar::Float(num), |int| Scalar::Integer(int.into())),
        _ => Scalar::Text(cleaned),
    }
}

/// Parse plain integer text of any length: `i64`, then `u64`, then exact digits.
fn parse_integer(candidate: &str) -> Option<Number> {
    if let Ok(int) = candidate.parse::<i64>() {
        return Some(int.into());
    }
    if let Ok(int) = candidate.parse::<u64>() {
        return Some(int.into());
    }

    let (sign, digits) = match candidate.as_bytes().first()? {
        b'-' => ("-", &candidate[1..]),
        b'+' => ("", &candidate[1..]),
        _ => ("", candidate),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Leading zeros are not valid in a JSON number.
    let digits = digits.trim_start_matches('0');
    format!("{sign}{digits}").parse::<Number>().ok()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integer_from_float(num: f64) -> Option<i64> {
    let truncated = num.trunc();
    (truncated >= i64::MIN as f64 && truncated < i64::MAX as f64).then(|| truncated as i64)
}

fn bracketed_interior(text: &str) -> Option<&str> {
    let wrapped = |open: char, close: char| {
        text.len() >= 2 && text.starts_with(open) && text.ends_with(close)
    };
    (wrapped('[', ']') || wrapped('(', ')')).then(|| &text[1..text.len() - 1])
}

/// Normalize raw text into a scalar or a list of scalars.
#[must_use]
pub fn normalize(raw: &str) -> FieldValue {
    let cleaned = strip_quotes(raw);
    let cleaned = cleaned.trim_end_matches('\n');

    match bracketed_interior(cleaned) {
        Some(interior) => FieldValue::List(
            interior
                .split(',')
                .map(|item| coerce_scalar(item.trim_matches(' ')))
                .collect(),
        ),
        None => FieldValue::Scalar(coerce_scalar(cleaned)),
    }
}

/// Normalize a value already stored in a record.
///
/// Strings get the full treatment, string list items are coerced one by one,
/// everything else is returned unchanged.
#[must_use]
pub fn renormalize(value: &Value) -> Value {
    match value {
        Value::String(text) => normalize(text).into(),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::String(text) => coerce_scalar(text).into(),
                    other => other.clone(),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Integer(int) => Self::Number(int),
            Scalar::Float(num) => Self::from(num),
            Scalar::Text(text) => Self::String(text),
        }
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Scalar(scalar) => scalar.into(),
            FieldValue::List(items) => Self::Array(items.into_iter().map(Self::from).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn text(s: &str) -> Scalar {
        Scalar::Text(s.to_string())
    }

    fn int(n: i64) -> Scalar {
        Scalar::Integer(n.into())
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(normalize("42"), FieldValue::Scalar(int(42)));
        assert_eq!(normalize("-7"), FieldValue::Scalar(int(-7)));
        assert_eq!(normalize("007"), FieldValue::Scalar(int(7)));
        assert_eq!(normalize("1e3"), FieldValue::Scalar(int(1000)));
    }

    #[test]
    fn test_large_integers_keep_every_digit() {
        let value: Value = normalize("99999999999999999999").into();
        assert_eq!(value.to_string(), "99999999999999999999");

        let value: Value = normalize("-000123456789012345678901234").into();
        assert_eq!(value.to_string(), "-123456789012345678901234");

        assert_eq!(
            normalize("18446744073709551615"),
            FieldValue::Scalar(Scalar::Integer(u64::MAX.into()))
        );
    }

    #[test]
    fn test_float_coercion() {
        assert_eq!(normalize("4.2"), FieldValue::Scalar(Scalar::Float(4.2)));
        assert_eq!(normalize("2.0"), FieldValue::Scalar(Scalar::Float(2.0)));
        assert_eq!(normalize(".5"), FieldValue::Scalar(Scalar::Float(0.5)));
    }

    #[test]
    fn test_text_fallback() {
        assert_eq!(normalize("abc"), FieldValue::Scalar(text("abc")));
        assert_eq!(normalize("v1.2.3"), FieldValue::Scalar(text("v1.2.3")));
        assert_eq!(normalize("nan"), FieldValue::Scalar(text("nan")));
        assert_eq!(normalize("inf"), FieldValue::Scalar(text("inf")));
        assert_eq!(normalize(""), FieldValue::Scalar(text("")));
    }

    #[test]
    fn test_quotes_are_stripped() {
        assert_eq!(normalize("'quoted'"), FieldValue::Scalar(text("quoted")));
        assert_eq!(normalize("\"12\""), FieldValue::Scalar(int(12)));
        assert_eq!(normalize("it's"), FieldValue::Scalar(text("its")));
    }

    #[test]
    fn test_trailing_newline_is_stripped() {
        assert_eq!(normalize("Ready\n"), FieldValue::Scalar(text("Ready")));
    }

    #[test]
    fn test_bracket_lists() {
        assert_eq!(
            normalize("[1, 2, 3]"),
            FieldValue::List(vec![int(1), int(2), int(3)])
        );
        assert_eq!(
            normalize("('Single-Cell', 4.5)"),
            FieldValue::List(vec![text("Single-Cell"), Scalar::Float(4.5)])
        );
    }

    #[test]
    fn test_empty_brackets_hold_one_empty_item() {
        assert_eq!(normalize("[]"), FieldValue::List(vec![text("")]));
        assert_eq!(normalize("[ ]"), FieldValue::List(vec![text("")]));
        assert_eq!(normalize("()"), FieldValue::List(vec![text("")]));
    }

    #[test]
    fn test_unbracketed_commas_stay_text() {
        assert_eq!(normalize("bar,baz"), FieldValue::Scalar(text("bar,baz")));
        assert_eq!(normalize("[open"), FieldValue::Scalar(text("[open")));
        assert_eq!(normalize("["), FieldValue::Scalar(text("[")));
        assert_eq!(normalize("("), FieldValue::Scalar(text("(")));
    }

    #[test]
    fn test_file_items_are_coerced_uniformly() {
        let raw = RawContent::Items(vec!["a".into(), " 'b' ".into(), "3".into(), "0.25\n".into()]);
        assert_eq!(
            raw.normalize(),
            FieldValue::List(vec![text("a"), text("b"), int(3), Scalar::Float(0.25)])
        );
    }

    #[test]
    fn test_raw_text_goes_through_list_detection() {
        let raw = RawContent::Text("[x, y]".into());
        assert_eq!(raw.normalize(), FieldValue::List(vec![text("x"), text("y")]));
    }

    #[test]
    fn test_field_value_to_json() {
        let value: Value = normalize("[1, 2.5, c]").into();
        assert_eq!(value, json!([1, 2.5, "c"]));
    }

    #[test]
    fn test_renormalize_existing_values() {
        assert_eq!(renormalize(&json!("2021")), json!(2021));
        assert_eq!(renormalize(&json!("[a, b]")), json!(["a", "b"]));
        assert_eq!(renormalize(&json!(["1", "'x'", 2, true])), json!([1, "x", 2, true]));
        assert_eq!(renormalize(&json!(3.5)), json!(3.5));
        assert_eq!(renormalize(&json!(null)), json!(null));
        assert_eq!(renormalize(&json!({"k": "1"})), json!({"k": "1"}));
    }

    #[test]
    fn test_renormalize_is_idempotent() {
        for raw in ["42", "4.2", "abc", "[1, 2, 3]", "'quoted'", "(a, 'b')", " 7 "] {
            let once = renormalize(&normalize(raw).into());
            assert_eq!(renormalize(&once), once, "input {raw:?}");
        }
    }
}
